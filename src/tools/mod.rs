// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Offline generation of classifier metadata artifacts.

pub mod config;
mod proto_builder;
mod simplifier;
mod validation;

use std::io::Write;

use log::info;
use protobuf::Message;
use thiserror::Error;

use crate::{
    metadata::{Metadata, MetadataError},
    proto_gen::classifier_metadata::MetadataProto,
};

pub use config::{MatcherType, MetadataConfig, SimplificationConfig};
pub use proto_builder::{EncodingError, to_metadata_proto};
pub use simplifier::MetadataSimplifier;
pub use validation::{SimplificationError, validate_no_change_to_original_ranges};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Metadata(#[from] MetadataError),
    #[error("{0}")]
    Simplification(#[from] SimplificationError),
    #[error("{0}")]
    Encoding(#[from] EncodingError),
    #[error("Failed to write metadata: {0}")]
    Write(#[from] protobuf::Error),
}

/// Builds an artifact from source metadata.
///
/// The configured types and calling codes are selected, the ranges are
/// simplified and the simplification is validated against the selected
/// data. Valid ranges are trimmed only after validation, since trimming
/// restricts the ranges being validated.
pub fn generate_metadata(source: &Metadata, config: &MetadataConfig) -> Result<MetadataProto, GenerateError> {
    let types = config.selected_types(source.types());
    let selected = source.select(&types, config.calling_codes.as_deref())?;
    info!(
        "Generating metadata {} for {} calling codes",
        config.version,
        selected.calling_codes().count()
    );

    let simplified = MetadataSimplifier::new(&config.simplification).simplify(&selected)?;
    validate_no_change_to_original_ranges(&selected, &simplified)?;
    let trimmed = simplified.trim_valid_ranges(config.include_empty_calling_codes)?;

    let proto = to_metadata_proto(&trimmed, config)?;
    info!(
        "Generated metadata with {} calling codes and {} tokens",
        proto.calling_code_data.len(),
        proto.token.len()
    );
    Ok(proto)
}

/// Serializes an artifact in the protobuf wire format.
pub fn write_metadata<W: Write>(proto: &MetadataProto, writer: &mut W) -> Result<(), GenerateError> {
    proto.write_to_writer(writer)?;
    Ok(())
}
