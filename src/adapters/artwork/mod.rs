//! Artwork adapters - code rendering, compositing, and asset loading.

mod compositor;
mod fs_store;
mod qr_renderer;

pub use compositor::PngImageComposer;
pub use fs_store::FilesystemBaseImageStore;
pub use qr_renderer::QrCodeRenderer;
