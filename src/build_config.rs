//! Build-time selection of the DLSS vendor libraries.
//!
//! This file is shared with `build.rs` (via `#[path]`), so it only depends on `std` and
//! `thiserror`.

use std::{
    env, fmt,
    path::{Component, Path, PathBuf},
};

/// Name of the module other targets depend on to get DLSS.
pub const MODULE_NAME: &str = "DLSS";
/// Definition enabling the Vulkan code path.
pub const VULKAN_DEFINITION: &str = "GRAPHICS_API_VULKAN";
/// Vulkan loader the Vulkan code path depends on.
pub const VULKAN_LOADER_DEPENDENCY: &str = "volk";
/// Vendor directory, relative to the module folder.
pub const VENDOR_DIR: &str = "../ThirdParty/DLSS";

/// Platform being built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    Windows,
    Linux,
    Mac,
    Android,
    Xbox,
    PlayStation,
    Switch,
    Web,
}

impl TargetPlatform {
    /// Maps a `CARGO_CFG_TARGET_OS` value.
    pub fn from_target_os(os: &str) -> Option<Self> {
        Some(match os {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "macos" | "ios" => Self::Mac,
            "android" => Self::Android,
            "emscripten" | "wasi" | "unknown" => Self::Web,
            "horizon" => Self::Switch,
            _ => return None,
        })
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// CPU architecture being built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetArchitecture {
    X86,
    X64,
    Arm,
    Arm64,
}

impl TargetArchitecture {
    /// Maps a `CARGO_CFG_TARGET_ARCH` value.
    pub fn from_target_arch(arch: &str) -> Option<Self> {
        Some(match arch {
            "x86" => Self::X86,
            "x86_64" => Self::X64,
            "arm" => Self::Arm,
            "aarch64" => Self::Arm64,
            _ => return None,
        })
    }
}

impl fmt::Display for TargetArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X86 => "x86",
            Self::X64 => "x64",
            Self::Arm => "ARM",
            Self::Arm64 => "ARM64",
        })
    }
}

/// Build configuration. Only [`TargetConfiguration::Release`] ships the release runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetConfiguration {
    Debug,
    #[default]
    Development,
    Release,
}

/// Location of the Vulkan SDK, if one is installed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VulkanSdk {
    root: Option<PathBuf>,
}

impl VulkanSdk {
    /// Looks up the SDK from the `VULKAN_SDK` environment variable.
    pub fn detect() -> Self {
        env::var_os("VULKAN_SDK")
            .map(PathBuf::from)
            .filter(|path| path.is_dir())
            .map(Self::at)
            .unwrap_or_default()
    }

    /// SDK installed at `root`. Not checked for existence.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn missing() -> Self {
        Self { root: None }
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Folder holding `vulkan/vulkan.h`.
    pub fn include_dir(&self, platform: TargetPlatform) -> Option<PathBuf> {
        let name = match platform {
            TargetPlatform::Windows => "Include",
            _ => "include",
        };
        self.root.as_ref().map(|root| root.join(name))
    }

    /// Folder holding the Vulkan loader library.
    pub fn lib_dir(&self, platform: TargetPlatform) -> Option<PathBuf> {
        let name = match platform {
            TargetPlatform::Windows => "Lib",
            _ => "lib",
        };
        self.root.as_ref().map(|root| root.join(name))
    }
}

/// Options for a single build target.
///
/// The first four fields describe the target, the lists are filled by [`setup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    pub platform: TargetPlatform,
    pub architecture: TargetArchitecture,
    pub configuration: TargetConfiguration,
    /// Link against the debug C runtime.
    pub use_debug_crt: bool,
    pub private_include_paths: Vec<PathBuf>,
    /// Static or import libraries passed to the linker.
    pub link_input_files: Vec<PathBuf>,
    /// Runtime files staged next to the built binary.
    pub dependency_files: Vec<PathBuf>,
    pub private_definitions: Vec<String>,
    pub private_dependencies: Vec<String>,
}

impl BuildOptions {
    pub fn new(
        platform: TargetPlatform,
        architecture: TargetArchitecture,
        configuration: TargetConfiguration,
    ) -> Self {
        Self {
            platform,
            architecture,
            configuration,
            use_debug_crt: false,
            private_include_paths: Vec::new(),
            link_input_files: Vec::new(),
            dependency_files: Vec::new(),
            private_definitions: Vec::new(),
            private_dependencies: Vec::new(),
        }
    }

    pub fn with_debug_crt(mut self, use_debug_crt: bool) -> Self {
        self.use_debug_crt = use_debug_crt;
        self
    }

    /// Builds options from the variables cargo hands to build scripts.
    ///
    /// `use_debug_crt` is always `false` here, use [`BuildOptions::with_debug_crt`] to
    /// link the debug CRT variant from a non-cargo toolchain.
    pub fn from_cargo_env() -> Result<Self, BuildConfigError> {
        let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
        let profile = env::var("PROFILE").unwrap_or_default();

        let platform = TargetPlatform::from_target_os(&os)
            .ok_or_else(|| BuildConfigError::UnknownTarget(os.clone()))?;
        let architecture = TargetArchitecture::from_target_arch(&arch)
            .ok_or_else(|| BuildConfigError::UnknownTarget(arch.clone()))?;
        let configuration = match profile.as_str() {
            "release" => TargetConfiguration::Release,
            "debug" => TargetConfiguration::Debug,
            _ => TargetConfiguration::Development,
        };

        // rustc links the release CRT on MSVC even for debug builds
        Ok(Self::new(platform, architecture, configuration))
    }
}

/// Error returned by [`setup`] and [`BuildOptions::from_cargo_env`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildConfigError {
    #[error("DLSS does not support platform {0}")]
    UnsupportedPlatform(TargetPlatform),
    #[error("DLSS does not support architecture {0}")]
    UnsupportedArchitecture(TargetArchitecture),
    #[error("Unknown build target: {0:?}")]
    UnknownTarget(String),
}

/// Platform/architecture pairs the vendor ships binaries for.
pub fn is_supported(platform: TargetPlatform, architecture: TargetArchitecture) -> bool {
    matches!(
        (platform, architecture),
        (TargetPlatform::Windows, TargetArchitecture::X64)
            | (TargetPlatform::Linux, TargetArchitecture::X64)
    )
}

/// Adds [`MODULE_NAME`] to `dependencies` if the target can use DLSS.
pub fn conditional_import(options: &BuildOptions, dependencies: &mut Vec<String>) -> bool {
    let result = is_supported(options.platform, options.architecture);
    if result {
        dependencies.push(MODULE_NAME.to_owned());
    }
    result
}

/// Configures `options` to compile and link against the DLSS SDK.
///
/// `module_folder` is the folder of the module; the vendor files live in
/// [`VENDOR_DIR`] relative to it. Only path strings are built here, verifying that the
/// files exist is left to the linker.
pub fn setup(
    options: &mut BuildOptions,
    module_folder: &Path,
    vulkan_sdk: &VulkanSdk,
) -> Result<(), BuildConfigError> {
    let vendor = remove_path_relative_parts(&module_folder.join(VENDOR_DIR));

    // Link against DLSS library
    options.private_include_paths.push(vendor.join("include"));
    let release = options.configuration == TargetConfiguration::Release;
    match options.platform {
        TargetPlatform::Windows => match options.architecture {
            TargetArchitecture::X64 => {
                let lib_path = vendor.join("lib").join("Windows_x86_64");
                let import_lib = if options.use_debug_crt {
                    "nvsdk_ngx_d_dbg.lib"
                } else {
                    "nvsdk_ngx_d.lib"
                };
                options
                    .link_input_files
                    .push(lib_path.join("x86_64").join(import_lib));
                options
                    .dependency_files
                    .push(lib_path.join(if release { "rel" } else { "dev" }).join("nvngx_dlss.dll"));
            }
            architecture => return Err(BuildConfigError::UnsupportedArchitecture(architecture)),
        },
        TargetPlatform::Linux => match options.architecture {
            TargetArchitecture::X64 => {
                let lib_path = vendor.join("lib").join("Linux_x86_64");
                options.link_input_files.push(lib_path.join("libnvsdk_ngx.a"));
                options.dependency_files.push(
                    lib_path
                        .join(if release { "rel" } else { "dev" })
                        .join("libnvidia-ngx-dlss.so.2.4.0"),
                );
            }
            architecture => return Err(BuildConfigError::UnsupportedArchitecture(architecture)),
        },
        platform => return Err(BuildConfigError::UnsupportedPlatform(platform)),
    }

    // Vulkan support is optional and needs the Vulkan SDK
    if vulkan_sdk.is_valid() {
        push_unique(&mut options.private_definitions, VULKAN_DEFINITION);
        push_unique(&mut options.private_dependencies, VULKAN_LOADER_DEPENDENCY);
    }

    Ok(())
}

/// A single linker instruction for cargo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkDirective {
    Search(PathBuf),
    Static(String),
    Dylib(String),
}

impl fmt::Display for LinkDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search(dir) => write!(f, "cargo:rustc-link-search=native={}", dir.display()),
            Self::Static(name) => write!(f, "cargo:rustc-link-lib=static={name}"),
            Self::Dylib(name) => write!(f, "cargo:rustc-link-lib=dylib={name}"),
        }
    }
}

/// Turns the options filled by [`setup`] into linker instructions.
///
/// Besides the link inputs this resolves the private dependencies: the Vulkan loader
/// links `vulkan-1`/`vulkan` from the SDK. On Linux the static NGX archive also needs the
/// C++ runtime and `libdl`.
pub fn link_directives(options: &BuildOptions, vulkan_sdk: &VulkanSdk) -> Vec<LinkDirective> {
    let mut directives = Vec::new();
    for library in &options.link_input_files {
        if let Some(dir) = library.parent() {
            directives.push(LinkDirective::Search(dir.to_path_buf()));
        }
        if let Some(name) = library.file_name().and_then(|name| name.to_str()) {
            let name = name
                .strip_prefix("lib")
                .unwrap_or(name)
                .trim_end_matches(".lib")
                .trim_end_matches(".a");
            directives.push(LinkDirective::Static(name.to_owned()));
        }
    }
    if options.platform == TargetPlatform::Linux && !options.link_input_files.is_empty() {
        directives.push(LinkDirective::Dylib("stdc++".to_owned()));
        directives.push(LinkDirective::Dylib("dl".to_owned()));
    }

    for dependency in &options.private_dependencies {
        if dependency != VULKAN_LOADER_DEPENDENCY {
            continue;
        }
        if let Some(dir) = vulkan_sdk.lib_dir(options.platform) {
            directives.push(LinkDirective::Search(dir));
        }
        let loader = match options.platform {
            TargetPlatform::Windows => "vulkan-1",
            _ => "vulkan",
        };
        directives.push(LinkDirective::Dylib(loader.to_owned()));
    }
    directives
}

/// Cfg flag a definition or dependency turns on in the compiled crate.
///
/// Definitions map to their lowercase name, the Vulkan loader to `vulkan_loader`.
pub fn cfg_flags(options: &BuildOptions) -> Vec<String> {
    let mut flags: Vec<String> = options
        .private_definitions
        .iter()
        .map(|definition| definition.to_lowercase())
        .collect();
    if options
        .private_dependencies
        .iter()
        .any(|dependency| dependency == VULKAN_LOADER_DEPENDENCY)
    {
        flags.push("vulkan_loader".to_owned());
    }
    flags
}

/// Include folders the NGX headers are parsed with.
pub fn bindgen_include_paths(options: &BuildOptions, vulkan_sdk: &VulkanSdk) -> Vec<PathBuf> {
    let mut paths = options.private_include_paths.clone();
    if options
        .private_definitions
        .iter()
        .any(|definition| definition == VULKAN_DEFINITION)
    {
        paths.extend(vulkan_sdk.include_dir(options.platform));
    }
    paths
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_owned());
    }
}

/// Lexically resolves `.` and `..` components.
pub fn remove_path_relative_parts(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(result.components().next_back(), Some(Component::Normal(_))) {
                    result.pop();
                } else if !result.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PLATFORMS: [TargetPlatform; 8] = [
        TargetPlatform::Windows,
        TargetPlatform::Linux,
        TargetPlatform::Mac,
        TargetPlatform::Android,
        TargetPlatform::Xbox,
        TargetPlatform::PlayStation,
        TargetPlatform::Switch,
        TargetPlatform::Web,
    ];
    const ALL_ARCHITECTURES: [TargetArchitecture; 4] = [
        TargetArchitecture::X86,
        TargetArchitecture::X64,
        TargetArchitecture::Arm,
        TargetArchitecture::Arm64,
    ];

    fn module_folder() -> PathBuf {
        PathBuf::from("/project/Source/DLSS")
    }

    fn vendor() -> PathBuf {
        PathBuf::from("/project/Source/ThirdParty/DLSS")
    }

    fn configure(
        platform: TargetPlatform,
        configuration: TargetConfiguration,
        debug_crt: bool,
        vulkan: &VulkanSdk,
    ) -> BuildOptions {
        let mut options = BuildOptions::new(platform, TargetArchitecture::X64, configuration)
            .with_debug_crt(debug_crt);
        setup(&mut options, &module_folder(), vulkan).unwrap();
        options
    }

    #[test]
    fn windows_release_with_vulkan() {
        let options = configure(
            TargetPlatform::Windows,
            TargetConfiguration::Release,
            false,
            &VulkanSdk::at("/sdk/vulkan"),
        );

        assert_eq!(options.private_include_paths, vec![vendor().join("include")]);
        assert_eq!(
            options.link_input_files,
            vec![vendor().join("lib/Windows_x86_64/x86_64/nvsdk_ngx_d.lib")]
        );
        assert_eq!(
            options.dependency_files,
            vec![vendor().join("lib/Windows_x86_64/rel/nvngx_dlss.dll")]
        );
        assert_eq!(options.private_definitions, vec![VULKAN_DEFINITION]);
        assert_eq!(options.private_dependencies, vec![VULKAN_LOADER_DEPENDENCY]);
    }

    #[test]
    fn windows_debug_crt_selects_debug_import_library() {
        let options = configure(
            TargetPlatform::Windows,
            TargetConfiguration::Debug,
            true,
            &VulkanSdk::missing(),
        );

        assert_eq!(
            options.link_input_files,
            vec![vendor().join("lib/Windows_x86_64/x86_64/nvsdk_ngx_d_dbg.lib")]
        );
        assert_eq!(
            options.dependency_files,
            vec![vendor().join("lib/Windows_x86_64/dev/nvngx_dlss.dll")]
        );
    }

    #[test]
    fn linux_selects_static_archive() {
        let release = configure(
            TargetPlatform::Linux,
            TargetConfiguration::Release,
            false,
            &VulkanSdk::missing(),
        );
        assert_eq!(
            release.link_input_files,
            vec![vendor().join("lib/Linux_x86_64/libnvsdk_ngx.a")]
        );
        assert_eq!(
            release.dependency_files,
            vec![vendor().join("lib/Linux_x86_64/rel/libnvidia-ngx-dlss.so.2.4.0")]
        );

        let development = configure(
            TargetPlatform::Linux,
            TargetConfiguration::Development,
            true,
            &VulkanSdk::missing(),
        );
        assert_eq!(
            development.link_input_files,
            vec![vendor().join("lib/Linux_x86_64/libnvsdk_ngx.a")]
        );
        assert_eq!(
            development.dependency_files,
            vec![vendor().join("lib/Linux_x86_64/dev/libnvidia-ngx-dlss.so.2.4.0")]
        );
    }

    #[test]
    fn vulkan_is_additive_and_added_once() {
        let vulkan = VulkanSdk::at("/sdk/vulkan");
        let mut options = BuildOptions::new(
            TargetPlatform::Linux,
            TargetArchitecture::X64,
            TargetConfiguration::Release,
        );
        setup(&mut options, &module_folder(), &vulkan).unwrap();
        setup(&mut options, &module_folder(), &vulkan).unwrap();
        assert_eq!(options.private_definitions, vec![VULKAN_DEFINITION]);
        assert_eq!(options.private_dependencies, vec![VULKAN_LOADER_DEPENDENCY]);

        let without = configure(
            TargetPlatform::Linux,
            TargetConfiguration::Release,
            false,
            &VulkanSdk::missing(),
        );
        assert!(without.private_definitions.is_empty());
        assert!(without.private_dependencies.is_empty());
        assert_eq!(without.link_input_files.len(), 1);
    }

    #[test]
    fn unsupported_targets_fail() {
        for platform in ALL_PLATFORMS {
            for architecture in ALL_ARCHITECTURES {
                if is_supported(platform, architecture) {
                    continue;
                }
                let mut options =
                    BuildOptions::new(platform, architecture, TargetConfiguration::Release);
                let err = setup(&mut options, &module_folder(), &VulkanSdk::at("/sdk"))
                    .unwrap_err();
                let expected = match platform {
                    TargetPlatform::Windows | TargetPlatform::Linux => {
                        BuildConfigError::UnsupportedArchitecture(architecture)
                    }
                    _ => BuildConfigError::UnsupportedPlatform(platform),
                };
                assert_eq!(err, expected);
                assert!(options.link_input_files.is_empty());
                assert!(options.dependency_files.is_empty());
                assert!(options.private_definitions.is_empty());
            }
        }
    }

    #[test]
    fn conditional_import_matches_allow_list() {
        for platform in ALL_PLATFORMS {
            for architecture in ALL_ARCHITECTURES {
                let options =
                    BuildOptions::new(platform, architecture, TargetConfiguration::Development);
                let mut dependencies = vec!["Core".to_owned()];
                let imported = conditional_import(&options, &mut dependencies);

                let expected = matches!(
                    (platform, architecture),
                    (TargetPlatform::Windows, TargetArchitecture::X64)
                        | (TargetPlatform::Linux, TargetArchitecture::X64)
                );
                assert_eq!(imported, expected);
                if expected {
                    assert_eq!(dependencies, vec!["Core", MODULE_NAME]);
                } else {
                    assert_eq!(dependencies, vec!["Core"]);
                }
            }
        }
    }

    #[test]
    fn error_messages_carry_offending_value() {
        assert_eq!(
            BuildConfigError::UnsupportedArchitecture(TargetArchitecture::Arm64).to_string(),
            "DLSS does not support architecture ARM64"
        );
        assert_eq!(
            BuildConfigError::UnsupportedPlatform(TargetPlatform::Mac).to_string(),
            "DLSS does not support platform Mac"
        );
    }

    #[test]
    fn relative_parts_are_removed() {
        assert_eq!(
            remove_path_relative_parts(Path::new("/a/b/./../c/d/..")),
            PathBuf::from("/a/c")
        );
        assert_eq!(
            remove_path_relative_parts(Path::new("../x/../y")),
            PathBuf::from("../y")
        );
    }

    #[test]
    fn vulkan_sdk_detection_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: this is the only test touching VULKAN_SDK.
        unsafe { env::set_var("VULKAN_SDK", dir.path()) };
        assert_eq!(VulkanSdk::detect().root(), Some(dir.path()));

        unsafe { env::set_var("VULKAN_SDK", dir.path().join("missing")) };
        assert!(!VulkanSdk::detect().is_valid());
        unsafe { env::remove_var("VULKAN_SDK") };
    }

    #[test]
    fn cargo_env_maps_profile_and_keeps_release_crt() {
        fn from_env(
            os: &str,
            arch: &str,
            profile: &str,
        ) -> Result<BuildOptions, BuildConfigError> {
            // SAFETY: this is the only test touching these variables.
            unsafe {
                env::set_var("CARGO_CFG_TARGET_OS", os);
                env::set_var("CARGO_CFG_TARGET_ARCH", arch);
                env::set_var("PROFILE", profile);
                env::set_var("CARGO_CFG_TARGET_FEATURE", "fxsr,sse,sse2");
            }
            BuildOptions::from_cargo_env()
        }

        let mut debug = from_env("windows", "x86_64", "debug").unwrap();
        assert_eq!(debug.platform, TargetPlatform::Windows);
        assert_eq!(debug.architecture, TargetArchitecture::X64);
        assert_eq!(debug.configuration, TargetConfiguration::Debug);
        assert!(!debug.use_debug_crt);
        setup(&mut debug, &module_folder(), &VulkanSdk::missing()).unwrap();
        assert_eq!(
            debug.link_input_files,
            vec![vendor().join("lib/Windows_x86_64/x86_64/nvsdk_ngx_d.lib")]
        );

        // SAFETY: see above.
        unsafe { env::set_var("CARGO_CFG_TARGET_FEATURE", "crt-static") };
        assert!(!BuildOptions::from_cargo_env().unwrap().use_debug_crt);

        let release = from_env("linux", "x86_64", "release").unwrap();
        assert_eq!(release.configuration, TargetConfiguration::Release);
        assert!(!release.use_debug_crt);

        let custom = from_env("linux", "x86_64", "bench").unwrap();
        assert_eq!(custom.configuration, TargetConfiguration::Development);

        assert_eq!(
            from_env("freebsd", "x86_64", "debug").unwrap_err(),
            BuildConfigError::UnknownTarget("freebsd".to_owned())
        );
        assert_eq!(
            from_env("linux", "riscv64", "debug").unwrap_err(),
            BuildConfigError::UnknownTarget("riscv64".to_owned())
        );

        // SAFETY: see above.
        unsafe {
            for name in [
                "CARGO_CFG_TARGET_OS",
                "CARGO_CFG_TARGET_ARCH",
                "PROFILE",
                "CARGO_CFG_TARGET_FEATURE",
            ] {
                env::remove_var(name);
            }
        }
    }

    #[test]
    fn vulkan_loader_links_sdk_library() {
        let vulkan = VulkanSdk::at("/sdk/vulkan");
        let linux = configure(TargetPlatform::Linux, TargetConfiguration::Release, false, &vulkan);
        assert_eq!(
            link_directives(&linux, &vulkan),
            vec![
                LinkDirective::Search(vendor().join("lib/Linux_x86_64")),
                LinkDirective::Static("nvsdk_ngx".to_owned()),
                LinkDirective::Dylib("stdc++".to_owned()),
                LinkDirective::Dylib("dl".to_owned()),
                LinkDirective::Search(PathBuf::from("/sdk/vulkan/lib")),
                LinkDirective::Dylib("vulkan".to_owned()),
            ]
        );
        assert_eq!(cfg_flags(&linux), vec!["graphics_api_vulkan", "vulkan_loader"]);

        let windows =
            configure(TargetPlatform::Windows, TargetConfiguration::Release, false, &vulkan);
        let directives = link_directives(&windows, &vulkan);
        assert_eq!(directives[1], LinkDirective::Static("nvsdk_ngx_d".to_owned()));
        assert_eq!(
            &directives[2..],
            [
                LinkDirective::Search(PathBuf::from("/sdk/vulkan/Lib")),
                LinkDirective::Dylib("vulkan-1".to_owned()),
            ]
        );
        assert_eq!(
            directives[1].to_string(),
            "cargo:rustc-link-lib=static=nvsdk_ngx_d"
        );
    }

    #[test]
    fn no_loader_without_vulkan_sdk() {
        let vulkan = VulkanSdk::missing();
        let windows =
            configure(TargetPlatform::Windows, TargetConfiguration::Release, false, &vulkan);
        assert_eq!(
            link_directives(&windows, &vulkan),
            vec![
                LinkDirective::Search(vendor().join("lib/Windows_x86_64/x86_64")),
                LinkDirective::Static("nvsdk_ngx_d".to_owned()),
            ]
        );
        assert!(cfg_flags(&windows).is_empty());
        assert_eq!(bindgen_include_paths(&windows, &vulkan), vec![vendor().join("include")]);
    }

    #[test]
    fn bindgen_sees_vulkan_headers() {
        let vulkan = VulkanSdk::at("/sdk/vulkan");
        let linux = configure(TargetPlatform::Linux, TargetConfiguration::Release, false, &vulkan);
        assert_eq!(
            bindgen_include_paths(&linux, &vulkan),
            vec![vendor().join("include"), PathBuf::from("/sdk/vulkan/include")]
        );
    }

    #[test]
    fn target_names_map_from_cargo() {
        assert_eq!(
            TargetPlatform::from_target_os("windows"),
            Some(TargetPlatform::Windows)
        );
        assert_eq!(TargetPlatform::from_target_os("freebsd"), None);
        assert_eq!(
            TargetArchitecture::from_target_arch("x86_64"),
            Some(TargetArchitecture::X64)
        );
        assert_eq!(
            TargetArchitecture::from_target_arch("aarch64"),
            Some(TargetArchitecture::Arm64)
        );
    }
}
