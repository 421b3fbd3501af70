pub mod corpus;
pub mod raster;
