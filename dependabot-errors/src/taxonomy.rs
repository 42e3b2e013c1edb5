// dependabot-errors/src/taxonomy.rs
//! The closed set of failures an update run can report.
//!
//! Every variant carries a [`SanitizedMessage`] plus its own typed fields.
//! Variants are created through the constructors on [`DependabotError`], which
//! synthesize the message where the kind defines one and route all free text
//! and source fields through the global sanitizer before storing them. The
//! wording of synthesized messages is a stable contract: callers classify
//! errors by matching on it.
//!
//! License: MIT OR Apache-2.0

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{json, Value};

use crate::sanitizer::{global, SanitizedMessage};
use crate::source::RepoSource;

/// A failure surfaced by an update run.
///
/// `Display` renders the sanitized message. Fields named `source` hold
/// sanitized URLs, not underlying causes, so [`std::error::Error::source`]
/// is always `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependabotError {
    OutOfDisk { message: SanitizedMessage },

    OutOfMemory { message: SanitizedMessage },

    NotImplemented { message: SanitizedMessage },

    DirectoryNotFound { message: SanitizedMessage, directory_name: String },

    BranchNotFound { message: SanitizedMessage, branch_name: String },

    RepoNotFound { message: SanitizedMessage, source: RepoSource },

    ToolVersionNotSupported {
        message: SanitizedMessage,
        tool_name: String,
        detected_version: String,
        supported_versions: String,
    },

    DependencyFileNotFound { message: SanitizedMessage, file_path: String },

    DependencyFileNotParseable { message: SanitizedMessage, file_path: String },

    DependencyFileNotEvaluatable { message: SanitizedMessage },

    DependencyFileNotResolvable { message: SanitizedMessage },

    ConfigFileFileNotFound { message: SanitizedMessage },

    InconsistentRegistryResponse { message: SanitizedMessage },

    AllVersionsIgnored { message: SanitizedMessage },

    UnexpectedExternalCode { message: SanitizedMessage },

    PrivateSourceAuthenticationFailure { message: SanitizedMessage, source: String },

    PrivateSourceTimedOut { message: SanitizedMessage, source: String },

    PrivateSourceCertificateFailure { message: SanitizedMessage, source: String },

    PrivateSourceBadResponse { message: SanitizedMessage, source: String },

    MissingEnvironmentVariable { message: SanitizedMessage, environment_variable: String },

    GitDependenciesNotReachable { message: SanitizedMessage, dependency_urls: Vec<String> },

    GitDependencyReferenceNotFound { message: SanitizedMessage, dependency: String },

    PathDependenciesNotReachable { message: SanitizedMessage, dependencies: Vec<String> },

    GoModulePathMismatch {
        message: SanitizedMessage,
        go_mod: String,
        declared_path: String,
        discovered_path: String,
    },

    UnresolvableVersion { message: SanitizedMessage, dependencies: Vec<String> },
}

/// Uses the caller's message, or the kind name when there is none.
fn message_or_kind(message: Option<&str>, kind: &str) -> SanitizedMessage {
    global().sanitize(message.unwrap_or(kind))
}

fn sanitize_field(value: impl Into<String>) -> String {
    global().sanitize(&value.into()).into_string()
}

fn sanitize_source_field(source: impl Into<String>) -> String {
    global().sanitize_source(&source.into()).into_string()
}

/// Splits a path the way the updater's file fetchers do: leading empty
/// segments are kept (they mark an absolute path), trailing ones are dropped.
fn path_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

impl DependabotError {
    pub fn out_of_disk(message: Option<&str>) -> Self {
        Self::OutOfDisk { message: message_or_kind(message, "OutOfDisk") }
    }

    pub fn out_of_memory(message: Option<&str>) -> Self {
        Self::OutOfMemory { message: message_or_kind(message, "OutOfMemory") }
    }

    pub fn not_implemented(message: Option<&str>) -> Self {
        Self::NotImplemented { message: message_or_kind(message, "NotImplemented") }
    }

    pub fn directory_not_found(directory_name: impl Into<String>, message: Option<&str>) -> Self {
        Self::DirectoryNotFound {
            message: message_or_kind(message, "DirectoryNotFound"),
            directory_name: sanitize_field(directory_name),
        }
    }

    pub fn branch_not_found(branch_name: impl Into<String>, message: Option<&str>) -> Self {
        Self::BranchNotFound {
            message: message_or_kind(message, "BranchNotFound"),
            branch_name: sanitize_field(branch_name),
        }
    }

    pub fn repo_not_found(source: impl Into<RepoSource>, message: Option<&str>) -> Self {
        Self::RepoNotFound {
            message: message_or_kind(message, "RepoNotFound"),
            source: source.into().sanitized(global()),
        }
    }

    pub fn tool_version_not_supported(
        tool_name: impl Into<String>,
        detected_version: impl Into<String>,
        supported_versions: impl Into<String>,
    ) -> Self {
        let tool_name = sanitize_field(tool_name);
        let detected_version = sanitize_field(detected_version);
        let supported_versions = sanitize_field(supported_versions);
        let message = format!(
            "Dependabot detected the following {tool_name} requirement for your project: '{detected_version}'.\n\n\
             Currently, the following {tool_name} versions are supported in Dependabot: {supported_versions}."
        );
        Self::ToolVersionNotSupported {
            message: global().sanitize(&message),
            tool_name,
            detected_version,
            supported_versions,
        }
    }

    pub fn dependency_file_not_found(file_path: impl Into<String>, message: Option<&str>) -> Self {
        let file_path = file_path.into();
        let default = format!("{file_path} not found");
        Self::DependencyFileNotFound {
            message: global().sanitize(message.unwrap_or(&default)),
            file_path,
        }
    }

    pub fn dependency_file_not_parseable(file_path: impl Into<String>, message: Option<&str>) -> Self {
        let file_path = file_path.into();
        let default = format!("{file_path} not parseable");
        Self::DependencyFileNotParseable {
            message: global().sanitize(message.unwrap_or(&default)),
            file_path,
        }
    }

    pub fn dependency_file_not_evaluatable(message: Option<&str>) -> Self {
        Self::DependencyFileNotEvaluatable {
            message: message_or_kind(message, "DependencyFileNotEvaluatable"),
        }
    }

    pub fn dependency_file_not_resolvable(message: Option<&str>) -> Self {
        Self::DependencyFileNotResolvable {
            message: message_or_kind(message, "DependencyFileNotResolvable"),
        }
    }

    pub fn config_file_not_found(message: Option<&str>) -> Self {
        Self::ConfigFileFileNotFound { message: message_or_kind(message, "ConfigFileFileNotFound") }
    }

    pub fn inconsistent_registry_response(message: Option<&str>) -> Self {
        Self::InconsistentRegistryResponse {
            message: message_or_kind(message, "InconsistentRegistryResponse"),
        }
    }

    pub fn all_versions_ignored(message: Option<&str>) -> Self {
        Self::AllVersionsIgnored { message: message_or_kind(message, "AllVersionsIgnored") }
    }

    pub fn unexpected_external_code(message: Option<&str>) -> Self {
        Self::UnexpectedExternalCode { message: message_or_kind(message, "UnexpectedExternalCode") }
    }

    pub fn private_source_authentication_failure(source: impl Into<String>) -> Self {
        let source = sanitize_source_field(source);
        let message = format!(
            "The following source could not be reached as it requires authentication \
             (and any provided details were invalid or lacked the required permissions): {source}"
        );
        Self::PrivateSourceAuthenticationFailure { message: global().sanitize(&message), source }
    }

    pub fn private_source_timed_out(source: impl Into<String>) -> Self {
        let source = sanitize_source_field(source);
        let message = format!("The following source timed out: {source}");
        Self::PrivateSourceTimedOut { message: global().sanitize(&message), source }
    }

    pub fn private_source_certificate_failure(source: impl Into<String>) -> Self {
        let source = sanitize_source_field(source);
        let message = format!("Could not verify the SSL certificate for {source}");
        Self::PrivateSourceCertificateFailure { message: global().sanitize(&message), source }
    }

    pub fn private_source_bad_response(source: impl Into<String>) -> Self {
        let source = sanitize_source_field(source);
        let message = format!("Bad response error while accessing source: {source}");
        Self::PrivateSourceBadResponse { message: global().sanitize(&message), source }
    }

    pub fn missing_environment_variable(environment_variable: impl Into<String>) -> Self {
        let environment_variable = sanitize_field(environment_variable);
        let message = format!("Missing environment variable {environment_variable}");
        Self::MissingEnvironmentVariable { message: global().sanitize(&message), environment_variable }
    }

    /// Callers holding a single URL pass a one-element sequence.
    pub fn git_dependencies_not_reachable<I, S>(dependency_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dependency_urls: Vec<String> = dependency_urls
            .into_iter()
            .map(|url| global().filter_sensitive_data(&url.into()))
            .collect();
        let message = format!(
            "The following git URLs could not be retrieved: {}",
            dependency_urls.join(", ")
        );
        Self::GitDependenciesNotReachable { message: global().sanitize(&message), dependency_urls }
    }

    pub fn git_dependency_reference_not_found(dependency: impl Into<String>) -> Self {
        let dependency = sanitize_field(dependency);
        let message = format!("The branch or reference specified for {dependency} could not be retrieved");
        Self::GitDependencyReferenceNotFound { message: global().sanitize(&message), dependency }
    }

    pub fn path_dependencies_not_reachable<I, S>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dependencies: Vec<String> = dependencies.into_iter().map(sanitize_field).collect();
        let message = format!(
            "The following path based dependencies could not be retrieved: {}",
            dependencies.join(", ")
        );
        Self::PathDependenciesNotReachable { message: global().sanitize(&message), dependencies }
    }

    pub fn go_module_path_mismatch(
        go_mod: impl Into<String>,
        declared_path: impl Into<String>,
        discovered_path: impl Into<String>,
    ) -> Self {
        let go_mod = sanitize_field(go_mod);
        let declared_path = sanitize_field(declared_path);
        let discovered_path = sanitize_field(discovered_path);
        let message = format!(
            "The module path '{declared_path}' found in {go_mod} doesn't match the actual path \
             '{discovered_path}' in the dependency's go.mod"
        );
        Self::GoModulePathMismatch {
            message: global().sanitize(&message),
            go_mod,
            declared_path,
            discovered_path,
        }
    }

    pub fn unresolvable_version<I, S>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dependencies: Vec<String> = dependencies.into_iter().map(sanitize_field).collect();
        let message = format!(
            "Unable to determine semantic version from tags or commits for dependencies. \
             Dependencies must have a tag or commit that references a semantic version. \
             Affected dependencies: {}",
            dependencies.join(", ")
        );
        Self::UnresolvableVersion { message: global().sanitize(&message), dependencies }
    }

    /// The sanitized message shared by every variant.
    pub fn message(&self) -> &SanitizedMessage {
        match self {
            Self::OutOfDisk { message }
            | Self::OutOfMemory { message }
            | Self::NotImplemented { message }
            | Self::DirectoryNotFound { message, .. }
            | Self::BranchNotFound { message, .. }
            | Self::RepoNotFound { message, .. }
            | Self::ToolVersionNotSupported { message, .. }
            | Self::DependencyFileNotFound { message, .. }
            | Self::DependencyFileNotParseable { message, .. }
            | Self::DependencyFileNotEvaluatable { message }
            | Self::DependencyFileNotResolvable { message }
            | Self::ConfigFileFileNotFound { message }
            | Self::InconsistentRegistryResponse { message }
            | Self::AllVersionsIgnored { message }
            | Self::UnexpectedExternalCode { message }
            | Self::PrivateSourceAuthenticationFailure { message, .. }
            | Self::PrivateSourceTimedOut { message, .. }
            | Self::PrivateSourceCertificateFailure { message, .. }
            | Self::PrivateSourceBadResponse { message, .. }
            | Self::MissingEnvironmentVariable { message, .. }
            | Self::GitDependenciesNotReachable { message, .. }
            | Self::GitDependencyReferenceNotFound { message, .. }
            | Self::PathDependenciesNotReachable { message, .. }
            | Self::GoModulePathMismatch { message, .. }
            | Self::UnresolvableVersion { message, .. } => message,
        }
    }

    /// Stable identifier reported alongside the error.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::OutOfDisk { .. } => "out_of_disk",
            Self::OutOfMemory { .. } => "out_of_memory",
            Self::NotImplemented { .. } => "not_implemented",
            Self::DirectoryNotFound { .. } => "directory_not_found",
            Self::BranchNotFound { .. } => "branch_not_found",
            Self::RepoNotFound { .. } => "repo_not_found",
            Self::ToolVersionNotSupported { .. } => "tool_version_not_supported",
            Self::DependencyFileNotFound { .. } => "dependency_file_not_found",
            Self::DependencyFileNotParseable { .. } => "dependency_file_not_parseable",
            Self::DependencyFileNotEvaluatable { .. } => "dependency_file_not_evaluatable",
            Self::DependencyFileNotResolvable { .. } => "dependency_file_not_resolvable",
            Self::ConfigFileFileNotFound { .. } => "config_file_not_found",
            Self::InconsistentRegistryResponse { .. } => "inconsistent_registry_response",
            Self::AllVersionsIgnored { .. } => "all_versions_ignored",
            Self::UnexpectedExternalCode { .. } => "unexpected_external_code",
            Self::PrivateSourceAuthenticationFailure { .. } => "private_source_authentication_failure",
            Self::PrivateSourceTimedOut { .. } => "private_source_timed_out",
            Self::PrivateSourceCertificateFailure { .. } => "private_source_certificate_failure",
            Self::PrivateSourceBadResponse { .. } => "private_source_bad_response",
            Self::MissingEnvironmentVariable { .. } => "missing_environment_variable",
            Self::GitDependenciesNotReachable { .. } => "git_dependencies_not_reachable",
            Self::GitDependencyReferenceNotFound { .. } => "git_dependency_reference_not_found",
            Self::PathDependenciesNotReachable { .. } => "path_dependencies_not_reachable",
            Self::GoModulePathMismatch { .. } => "go_module_path_mismatch",
            Self::UnresolvableVersion { .. } => "unresolvable_version",
        }
    }

    /// Kind-specific attributes as a JSON object. Values are the sanitized ones.
    pub fn details(&self) -> Value {
        let mut details = match self {
            Self::DirectoryNotFound { directory_name, .. } => json!({ "directory-name": directory_name }),
            Self::BranchNotFound { branch_name, .. } => json!({ "branch-name": branch_name }),
            Self::RepoNotFound { source, .. } => json!({ "source": source }),
            Self::ToolVersionNotSupported { tool_name, detected_version, supported_versions, .. } => json!({
                "tool-name": tool_name,
                "detected-version": detected_version,
                "supported-versions": supported_versions,
            }),
            Self::DependencyFileNotFound { file_path, .. }
            | Self::DependencyFileNotParseable { file_path, .. } => {
                // Stored raw for the path accessors; only the report is sanitized.
                json!({ "file-path": global().sanitize(file_path) })
            }
            Self::PrivateSourceAuthenticationFailure { source, .. }
            | Self::PrivateSourceTimedOut { source, .. }
            | Self::PrivateSourceCertificateFailure { source, .. }
            | Self::PrivateSourceBadResponse { source, .. } => json!({ "source": source }),
            Self::MissingEnvironmentVariable { environment_variable, .. } => {
                json!({ "environment-variable": environment_variable })
            }
            Self::GitDependenciesNotReachable { dependency_urls, .. } => {
                json!({ "dependency-urls": dependency_urls })
            }
            Self::GitDependencyReferenceNotFound { dependency, .. } => json!({ "dependency": dependency }),
            Self::PathDependenciesNotReachable { dependencies, .. }
            | Self::UnresolvableVersion { dependencies, .. } => json!({ "dependencies": dependencies }),
            Self::GoModulePathMismatch { go_mod, declared_path, discovered_path, .. } => json!({
                "go-mod": go_mod,
                "declared-path": declared_path,
                "discovered-path": discovered_path,
            }),
            _ => json!({}),
        };
        if let Value::Object(map) = &mut details {
            map.insert("message".to_string(), Value::String(self.message().to_string()));
        }
        details
    }

    pub fn file_path(&self) -> Option<&str> {
        match self {
            Self::DependencyFileNotFound { file_path, .. }
            | Self::DependencyFileNotParseable { file_path, .. } => Some(file_path),
            _ => None,
        }
    }

    /// Last segment of the file path, for the dependency-file variants.
    ///
    /// # Panics
    ///
    /// If the stored path has no segments. Paths are always absolute, so this
    /// is a broken invariant rather than a recoverable condition.
    pub fn file_name(&self) -> Option<&str> {
        let file_path = self.file_path()?;
        let segments = path_segments(file_path);
        let Some(name) = segments.last() else {
            panic!("dependency file path '{file_path}' has no segments");
        };
        Some(*name)
    }

    /// Everything but the last path segment, always with a leading `/`.
    ///
    /// # Panics
    ///
    /// Under the same condition as [`DependabotError::file_name`].
    pub fn directory(&self) -> Option<String> {
        let file_path = self.file_path()?;
        let segments = path_segments(file_path);
        let Some((_, parents)) = segments.split_last() else {
            panic!("dependency file path '{file_path}' has no segments");
        };
        let joined = parents.join("/");
        Some(format!("/{}", joined.trim_start_matches('/')))
    }
}

impl fmt::Display for DependabotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for DependabotError {}

impl Serialize for DependabotError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("error-type", self.error_type())?;
        map.serialize_entry("error-detail", &self.details())?;
        map.end()
    }
}
