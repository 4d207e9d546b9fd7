mod simple;

pub use simple::SimpleRenderer;
