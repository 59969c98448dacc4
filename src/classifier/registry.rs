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

use std::sync::Arc;

use dashmap::DashMap;
use log::debug;

use super::{RawClassifier, VersionInfo, errors::LoadError};

/// Loaded classifiers keyed by data schema.
///
/// Each schema is loaded at most once and then shared. Every request is
/// checked against the version it states, so a client can never receive
/// data older than it expects.
#[derive(Debug, Default)]
pub struct ClassifierRegistry {
    classifiers: DashMap<String, Arc<RawClassifier>>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the classifier for the schema of `stated`, loading it from
    /// `bytes` if it is not loaded yet.
    pub fn get_or_load(&self, stated: &VersionInfo, bytes: &[u8]) -> Result<Arc<RawClassifier>, LoadError> {
        if let Some(classifier) = self.classifiers.get(&stated.data_schema_uri) {
            return check_version(classifier.value().clone(), stated);
        }
        let classifier = self
            .classifiers
            .entry(stated.data_schema_uri.clone())
            .or_try_insert_with(|| {
                debug!("Loading classifier for schema {}", stated.data_schema_uri);
                RawClassifier::load(bytes, stated).map(Arc::new)
            })?
            .value()
            .clone();
        check_version(classifier, stated)
    }

    /// Returns an already loaded classifier for a schema.
    pub fn get(&self, data_schema_uri: &str) -> Option<Arc<RawClassifier>> {
        self.classifiers.get(data_schema_uri).map(|c| c.value().clone())
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}

fn check_version(classifier: Arc<RawClassifier>, stated: &VersionInfo) -> Result<Arc<RawClassifier>, LoadError> {
    if !classifier.version().satisfies(stated) {
        return Err(LoadError::IncompatibleVersion {
            actual: classifier.version().clone(),
            stated: stated.clone(),
        });
    }
    Ok(classifier)
}
