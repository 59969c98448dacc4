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

//! Offline range metadata: classifiers, per calling code range maps and the
//! schema consistent collection of them which is the input of simplification
//! and encoding.

mod classifier_type;
mod collection;
mod errors;
mod range_classifier;
mod range_map;

pub use classifier_type::ClassifierType;
pub use collection::{CallingCodeInfo, Metadata, MetadataBuilder};
pub use errors::MetadataError;
pub use range_classifier::{RangeClassifier, RangeClassifierBuilder};
pub use range_map::{RangeMap, RangeMapBuilder};
