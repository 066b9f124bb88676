use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::{id::NodeId, world::Core};
use crate::{
    error::{Error, Result},
    geom::Rect,
};

/// Render the subtree under `root` as an indented outline of node names and
/// rectangles. This is a debugging aid for failed layout assertions.
pub fn dump(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root, 0).map_err(|e| Error::Render(e.to_string()))?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without colour codes.
pub fn dump_plain(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, root, 0).map_err(|e| Error::Render(e.to_string()))?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Format a rect compactly.
fn rect(r: Rect) -> String {
    format!("{} {} {}x{}", r.tl.x, r.tl.y, r.w, r.h)
}

/// Write an indented, coloured label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> io::Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")
}

/// Write one node and recurse into its children.
fn dump_node(buffer: &mut Buffer, core: &Core, id: NodeId, level: usize) -> io::Result<()> {
    let indent = "    ".repeat(level);
    let Some(node) = core.node(id) else {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(buffer, "{indent}<missing {id:?}>")?;
        return buffer.reset();
    };

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    if core.focus() == Some(id) {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(buffer, " (focus)")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    write_field(buffer, &indent, "border:", &rect(node.border()))?;
    write_field(buffer, &indent, "clip:", &rect(node.clip()))?;
    if !node.offset().is_zero() {
        let o = node.offset();
        write_field(buffer, &indent, "offset:", &format!("{} {}", o.x, o.y))?;
    }
    for child in node.children() {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metrics::DeviceMetrics,
        testing::{FixedFont, Tracker},
        widgets::LinearBox,
    };

    #[test]
    fn outline_lists_children() -> Result<()> {
        let mut c = Core::new(DeviceMetrics::new(100.0, 100.0), Box::new(FixedFont::new(10.0)));
        let list = c.add(LinearBox::vertical());
        let a = c.add(Tracker::new(10.0, 20.0));
        c.attach(list, a)?;
        c.set_top(list)?;
        c.update_layout()?;
        let out = dump_plain(&c, list)?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "linear_box");
        assert_eq!(lines[1], "  border: 0 0 10x20");
        assert_eq!(lines[3], "    tracker");
        Ok(())
    }
}
