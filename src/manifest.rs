use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::signature::{self, CType, ParamRole, Signature};

/// Everything a harness needs to load the fixture library and marshal calls into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureManifest {
    pub crate_name: String,
    pub version: String,
    pub rustc_target: String,
    pub library: LibraryFiles,
    pub link_libs: Vec<String>,
    pub header: String,
    pub functions: Vec<Signature>,
}

/// File names cargo produces for the fixture on a given target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFiles {
    pub staticlib: String,
    pub cdylib: String,
}

impl LibraryFiles {
    pub fn for_target(crate_name: &str, rustc_target: &str) -> Self {
        let normalized_name = crate_name.replace('-', "_");

        match TargetFamily::of(rustc_target) {
            Some(TargetFamily::WindowsMsvc | TargetFamily::WindowsGnu) => LibraryFiles {
                staticlib: format!("{}.lib", normalized_name),
                cdylib: format!("{}.dll", normalized_name),
            },
            Some(TargetFamily::Darwin) => LibraryFiles {
                staticlib: format!("lib{}.a", normalized_name),
                cdylib: format!("lib{}.dylib", normalized_name),
            },
            _ => LibraryFiles {
                staticlib: format!("lib{}.a", normalized_name),
                cdylib: format!("lib{}.so", normalized_name),
            },
        }
    }
}

pub struct ManifestGenerator {
    crate_name: String,
    version: String,
}

impl ManifestGenerator {
    pub fn new() -> Self {
        Self {
            crate_name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn generate(&self, rustc_target: &str) -> FixtureManifest {
        FixtureManifest {
            crate_name: self.crate_name.clone(),
            version: self.version.clone(),
            rustc_target: rustc_target.to_string(),
            library: LibraryFiles::for_target(&self.crate_name, rustc_target),
            link_libs: self.get_system_link_libs(rustc_target),
            header: format!("{}.h", self.crate_name.replace('-', "_")),
            functions: signature::catalog(),
        }
    }

    pub fn to_json(&self, manifest: &FixtureManifest) -> Result<String> {
        serde_json::to_string_pretty(manifest).context("Failed to serialize manifest to JSON")
    }

    pub fn write_manifest(&self, manifest: &FixtureManifest, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create manifest directory: {}", parent.display()))?;
        }

        let manifest_json = self.to_json(manifest)?;

        fs::write(path, manifest_json)
            .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

        debug!(path = %path.display(), functions = manifest.functions.len(), "wrote manifest");

        Ok(path.to_path_buf())
    }

    pub fn read_manifest(&self, path: &Path) -> Result<FixtureManifest> {
        let manifest_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest from {}", path.display()))?;

        let manifest: FixtureManifest = serde_json::from_str(&manifest_content)
            .with_context(|| format!("Failed to parse manifest JSON from {}", path.display()))?;

        Ok(manifest)
    }

    /// Checks a (possibly hand-edited) manifest against the symbols this build exports.
    pub fn validate_manifest(&self, manifest: &FixtureManifest) -> Result<()> {
        let mut seen = HashSet::new();

        for function in &manifest.functions {
            if !seen.insert(function.name.as_str()) {
                return Err(anyhow!("Duplicate function in manifest: {}", function.name));
            }

            let exported = signature::find(&function.name)
                .ok_or_else(|| anyhow!("Function is not exported by this library: {}", function.name))?;
            if exported != *function {
                return Err(anyhow!(
                    "Signature mismatch for {}: manifest declares `{}`, library exports `{}`",
                    function.name,
                    function.prototype(),
                    exported.prototype()
                ));
            }

            validate_params(function)?;
        }

        Ok(())
    }

    /// Native libraries a harness must add when linking the staticlib.
    fn get_system_link_libs(&self, rustc_target: &str) -> Vec<String> {
        let libs: &[&str] = match TargetFamily::of(rustc_target) {
            Some(TargetFamily::Linux | TargetFamily::FreeBsd) => &["pthread", "dl", "m", "c"],
            Some(TargetFamily::Darwin) => &["System", "pthread", "c"],
            Some(TargetFamily::WindowsMsvc) => {
                &["kernel32", "ntdll", "userenv", "ws2_32", "vcruntime", "ucrt"]
            }
            Some(TargetFamily::WindowsGnu) => &["kernel32", "ntdll", "userenv", "ws2_32"],
            None => &[],
        };

        libs.iter().map(|lib| lib.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetFamily {
    Linux,
    FreeBsd,
    Darwin,
    WindowsMsvc,
    WindowsGnu,
}

impl TargetFamily {
    fn of(rustc_target: &str) -> Option<Self> {
        if rustc_target.contains("linux") {
            Some(TargetFamily::Linux)
        } else if rustc_target.contains("freebsd") {
            Some(TargetFamily::FreeBsd)
        } else if rustc_target.contains("darwin") || rustc_target.contains("macos") {
            Some(TargetFamily::Darwin)
        } else if rustc_target.contains("windows") && rustc_target.contains("msvc") {
            Some(TargetFamily::WindowsMsvc)
        } else if rustc_target.contains("windows") {
            Some(TargetFamily::WindowsGnu)
        } else {
            None
        }
    }
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_params(function: &Signature) -> Result<()> {
    for (index, param) in function.params.iter().enumerate() {
        match param.role {
            ParamRole::In => {}
            ParamRole::Out | ParamRole::InOut => {
                if !param.ty.is_pointer() {
                    return Err(anyhow!(
                        "{}: parameter {} ({}) is an output but has non-pointer type {}",
                        function.name,
                        index,
                        param.name,
                        param.ty.c_name()
                    ));
                }
            }
            ParamRole::Array { len } => {
                if !param.ty.is_pointer() {
                    return Err(anyhow!(
                        "{}: array parameter {} ({}) has non-pointer type {}",
                        function.name,
                        index,
                        param.name,
                        param.ty.c_name()
                    ));
                }
                match function.params.get(len) {
                    Some(len_param) if len_param.ty == CType::Int && len != index => {}
                    _ => {
                        return Err(anyhow!(
                            "{}: array parameter {} ({}) names invalid length parameter {}",
                            function.name,
                            index,
                            param.name,
                            len
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}
