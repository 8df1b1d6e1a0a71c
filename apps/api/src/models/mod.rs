pub mod assessment;
pub mod profile;
pub mod roadmap;
