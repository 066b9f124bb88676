use crate::{
    backend::{Binding, BufferHandle, Renderer},
    error::{Error, Result},
    geom::Rect,
    render::Vertex,
};

/// A command received by [`RecordingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Scissor rect change.
    Scissor(Rect),
    /// Binding change.
    Bind(Binding),
    /// Draw submission.
    Draw {
        /// Buffer drawn from.
        buffer: BufferHandle,
        /// Vertex count.
        count: usize,
    },
}

/// Renderer double that keeps every command and every uploaded vertex.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Commands in arrival order.
    commands: Vec<Command>,
    /// Uploaded buffers, indexed by handle.
    buffers: Vec<Vec<Vertex>>,
}

impl RecordingRenderer {
    /// All commands received.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Vertex counts of each draw submission.
    pub fn draws(&self) -> Vec<usize> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Draw { count, .. } => Some(*count),
                _ => None,
            })
            .collect()
    }

    /// Scissor rects in the order they were set.
    pub fn scissors(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Scissor(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Every drawn vertex, in submission order.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Draw { buffer, count } => usize::try_from(buffer.0)
                    .ok()
                    .and_then(|i| self.buffers.get(i))
                    .map(|b| &b[..*count]),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.buffers.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn scissor(&mut self, rect: Rect) -> Result<()> {
        self.commands.push(Command::Scissor(rect));
        Ok(())
    }

    fn bind(&mut self, binding: Binding) -> Result<()> {
        self.commands.push(Command::Bind(binding));
        Ok(())
    }

    fn upload(&mut self, vertices: &[Vertex]) -> Result<BufferHandle> {
        let handle = BufferHandle(self.buffers.len() as u64);
        self.buffers.push(vertices.to_vec());
        Ok(handle)
    }

    fn draw(&mut self, buffer: BufferHandle, count: usize) -> Result<()> {
        let len = usize::try_from(buffer.0)
            .ok()
            .and_then(|i| self.buffers.get(i))
            .map(Vec::len)
            .ok_or_else(|| Error::Render(format!("unknown buffer {}", buffer.0)))?;
        if count > len {
            return Err(Error::Render(format!(
                "draw of {count} vertices from a buffer of {len}"
            )));
        }
        self.commands.push(Command::Draw { buffer, count });
        Ok(())
    }
}
