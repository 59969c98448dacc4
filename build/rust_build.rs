/**
 * Generates rust code for the classifier metadata schema in /resources
 */

use std::path::Path;

use thiserror::Error;

const RESOURCES_DIR: &str = "resources";
const PROTO_FILES: [&str; 1] = ["resources/classifier_metadata.proto"];

#[derive(Debug, Error)]
enum BuildError {
    #[error("Proto file is missing: {0}")]
    MissingProto(String),

    #[error("Failed to generate protobuf code: {0}")]
    Codegen(String),
}

fn check_inputs() -> Result<(), BuildError> {
    for proto in PROTO_FILES {
        if !Path::new(proto).is_file() {
            return Err(BuildError::MissingProto(proto.to_string()));
        }
        println!("cargo:rerun-if-changed={}", proto);
    }
    Ok(())
}

fn main() -> Result<(), BuildError> {
    check_inputs()?;
    protobuf_codegen::Codegen::new()
        .pure()
        .includes([RESOURCES_DIR])
        .inputs(PROTO_FILES)
        .cargo_out_dir("proto_gen")
        .run()
        .map_err(|err| BuildError::Codegen(err.to_string()))?;
    Ok(())
}
