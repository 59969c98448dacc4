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

//! Runtime classification of phone numbers from a decoded metadata artifact.

mod calling_code_classifier;
mod errors;
mod parser_data;
mod raw_classifier;
mod registry;
mod type_classifier;
mod version_info;

pub use errors::{ClassifierError, LoadError};
pub use parser_data::ParserData;
pub use raw_classifier::RawClassifier;
pub use registry::ClassifierRegistry;
pub use version_info::VersionInfo;
