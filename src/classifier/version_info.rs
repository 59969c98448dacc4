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

use std::fmt;

use protobuf::MessageField;

use crate::proto_gen::classifier_metadata::VersionInfoProto;

/// Identifies the data schema of a metadata artifact and the version of the
/// data within that schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionInfo {
    pub data_schema_uri: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionInfo {
    pub fn new(data_schema_uri: impl Into<String>, major: u32, minor: u32, patch: u32) -> Self {
        Self { data_schema_uri: data_schema_uri.into(), major, minor, patch }
    }

    /// Whether data of this version can be used by a client which expects
    /// `stated`: the schema and major version must be equal and this version
    /// must not be older than `stated`.
    pub fn satisfies(&self, stated: &VersionInfo) -> bool {
        self.data_schema_uri == stated.data_schema_uri
            && self.major == stated.major
            && (self.minor, self.patch) >= (stated.minor, stated.patch)
    }

    pub fn from_proto(proto: &VersionInfoProto) -> Self {
        Self {
            data_schema_uri: proto.data_schema_uri.clone(),
            major: proto.major_version.max(0) as u32,
            minor: proto.minor_version.max(0) as u32,
            patch: proto.patch_version.max(0) as u32,
        }
    }

    pub fn to_proto(&self) -> MessageField<VersionInfoProto> {
        let mut proto = VersionInfoProto::new();
        proto.data_schema_uri = self.data_schema_uri.clone();
        proto.major_version = self.major as i32;
        proto.minor_version = self.minor as i32;
        proto.patch_version = self.patch as i32;
        MessageField::some(proto)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}.{}.{}", self.data_schema_uri, self.major, self.minor, self.patch)
    }
}
