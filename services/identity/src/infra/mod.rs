pub mod db;
pub mod fhir;
