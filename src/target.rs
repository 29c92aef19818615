use crate::build_config::{MODULE_NAME, TargetArchitecture, TargetPlatform};

/// Whether a target builds the editor or the game runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Editor,
    Runtime,
}

/// Static description of a build target using DLSS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetDefinition {
    pub name: &'static str,
    pub kind: TargetKind,
    pub platforms: Vec<TargetPlatform>,
    pub architectures: Vec<TargetArchitecture>,
    pub modules: Vec<String>,
}

impl TargetDefinition {
    /// The editor target, `DLSSEditorTarget`.
    pub fn editor() -> Self {
        Self::new("DLSSEditorTarget", TargetKind::Editor)
    }

    /// The game runtime target, `DLSSTarget`.
    pub fn runtime() -> Self {
        Self::new("DLSSTarget", TargetKind::Runtime)
    }

    fn new(name: &'static str, kind: TargetKind) -> Self {
        Self {
            name,
            kind,
            platforms: vec![TargetPlatform::Windows, TargetPlatform::Linux],
            architectures: vec![TargetArchitecture::X64],
            modules: vec![MODULE_NAME.to_owned()],
        }
    }

    pub fn supports(&self, platform: TargetPlatform, architecture: TargetArchitecture) -> bool {
        self.platforms.contains(&platform) && self.architectures.contains(&architecture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_config::is_supported;

    #[test]
    fn editor_and_runtime_declare_the_same_targets() {
        let editor = TargetDefinition::editor();
        let runtime = TargetDefinition::runtime();
        assert_eq!(editor.kind, TargetKind::Editor);
        assert_eq!(runtime.kind, TargetKind::Runtime);
        assert_eq!(editor.platforms, runtime.platforms);
        assert_eq!(editor.architectures, runtime.architectures);
        assert_eq!(editor.modules, vec!["DLSS"]);
        assert_eq!(runtime.modules, vec!["DLSS"]);
    }

    #[test]
    fn declarations_agree_with_library_selection() {
        let target = TargetDefinition::runtime();
        for platform in [
            TargetPlatform::Windows,
            TargetPlatform::Linux,
            TargetPlatform::Mac,
            TargetPlatform::Android,
        ] {
            for architecture in [
                TargetArchitecture::X86,
                TargetArchitecture::X64,
                TargetArchitecture::Arm64,
            ] {
                assert_eq!(
                    target.supports(platform, architecture),
                    is_supported(platform, architecture),
                    "{platform} {architecture}"
                );
            }
        }
    }
}
