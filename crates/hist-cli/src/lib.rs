//! Library side of the hist2json CLI: logging setup and the conversion
//! pipeline.

pub mod logging;
pub mod pipeline;
