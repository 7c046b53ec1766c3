pub mod pairs;
pub mod refresh;
pub mod serve;
