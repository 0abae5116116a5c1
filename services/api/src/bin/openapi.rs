//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the callable and event endpoints to
//! `openapi.json`, or to the path given as the first argument.

use api_lib::web::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "openapi.json".to_string());
    std::fs::write(&path, ApiDoc::openapi().to_pretty_json()?)?;
    println!("OpenAPI specification generated at {}", path);
    Ok(())
}
