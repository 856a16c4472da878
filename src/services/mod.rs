//! Service layer separating file I/O from the pipeline logic

mod io;

pub use io::ImageIOService;
