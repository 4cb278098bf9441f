//! CLI command implementations.

pub(crate) mod files;
pub(crate) mod render;

pub(crate) use files::FilesArgs;
pub(crate) use render::RenderArgs;
