//! Built-in widgets: the two containers and a few leaves.

/// Button widget.
pub mod button;
/// Plain box widget.
pub mod fill;
/// Single-line text widget.
pub mod label;
/// Z-ordered stack container.
pub mod layer;
/// Linear list container.
pub mod linear;
/// Word-wrapped text widget.
pub mod paragraph;
/// Image widget.
pub mod picture;

pub use button::Button;
pub use fill::Fill;
pub use label::Label;
pub use layer::Layer;
pub use linear::LinearBox;
pub use paragraph::Paragraph;
pub use picture::Picture;
