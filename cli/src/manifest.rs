use std::path::Path;

use polymorph_catalog::{CatalogError, MenuOverride, TypeCatalog, TypeInfo};
use polymorph_selector::SelectorConfig;
use serde::Deserialize;

/// Type manifest loaded from a TOML file.
///
/// ```toml
/// opaque_roots = ["Engine.Object"]
///
/// [selector]
/// title = "Select Effect"
///
/// [[type]]
/// name = "Game.IEffect"
/// abstract = true
///
/// [[type]]
/// name = "Game.Fx.Spark"
/// bases = ["Game.IEffect"]
/// default_constructor = true
/// menu_name = "Sparkle"
/// menu_folder = "Effects/Light"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Types hidden from every selector built from this manifest, on top of
    /// the selector's own `opaque_roots`.
    #[serde(default)]
    pub opaque_roots: Vec<String>,
    /// Selector settings; `--config` replaces them.
    pub selector: Option<SelectorConfig>,
    #[serde(rename = "type", default)]
    pub types: Vec<TypeEntry>,
}

/// A single `[[type]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Full dotted name.
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub r#abstract: bool,
    #[serde(default)]
    pub generic: bool,
    #[serde(default)]
    pub value_type: bool,
    #[serde(default)]
    pub default_constructor: bool,
    pub menu_name: Option<String>,
    /// Present (even empty) means the folder is overridden.
    pub menu_folder: Option<String>,
}

impl TypeEntry {
    fn to_type_info(&self) -> TypeInfo {
        let mut info = TypeInfo::new(&self.name);
        info.bases = self.bases.clone();
        info.is_abstract = self.r#abstract;
        info.is_generic_definition = self.generic;
        info.is_value_type = self.value_type;
        info.has_default_constructor = self.default_constructor;

        if self.menu_name.is_some() || self.menu_folder.is_some() {
            info.menu_override = Some(MenuOverride {
                name: self.menu_name.clone().unwrap_or_default(),
                folder: self.menu_folder.clone(),
            });
        }
        info
    }
}

impl Manifest {
    /// Add the manifest-wide opaque roots that `config` does not list yet.
    pub fn apply_opaque_roots(&self, config: &mut SelectorConfig) {
        for root in &self.opaque_roots {
            if !config.opaque_roots.contains(root) {
                config.opaque_roots.push(root.clone());
            }
        }
    }
}

/// Parse a manifest from TOML text.
pub fn parse_manifest(content: &str) -> Result<Manifest, String> {
    let manifest: Manifest = toml::from_str(content).map_err(|e| e.to_string())?;
    if let Some(selector) = &manifest.selector {
        selector.validate().map_err(|e| e.to_string())?;
    }
    Ok(manifest)
}

/// Load a manifest from a TOML file.
///
/// Returns `Err` with a human-readable message if the file cannot be read
/// or parsed.
pub fn load_manifest(path: &Path) -> Result<Manifest, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_manifest(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Register every manifest type in a fresh catalog.
pub fn build_catalog(manifest: &Manifest) -> Result<TypeCatalog, CatalogError> {
    let mut catalog = TypeCatalog::new();
    for entry in &manifest.types {
        catalog.register_info(entry.to_type_info())?;
    }
    log::info!("Loaded {} types", catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [selector]
        title = "Select Effect"
        opaque_roots = ["Engine.Object"]

        [[type]]
        name = "Game.IEffect"
        abstract = true

        [[type]]
        name = "Game.Fx.Spark"
        bases = ["Game.IEffect"]
        default_constructor = true
        menu_name = "Sparkle"

        [[type]]
        name = "Game.Fx.Smoke"
        bases = ["Game.IEffect"]
        menu_folder = ""
    "#;

    #[test]
    fn parse_types_and_selector() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        assert_eq!(manifest.types.len(), 3);
        assert!(manifest.types[0].r#abstract);

        let selector = manifest.selector.unwrap();
        assert_eq!(selector.title, "Select Effect");
        assert_eq!(selector.null_label, "<null>");
    }

    #[test]
    fn overrides_are_mapped() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let spark = manifest.types[1].to_type_info();
        assert_eq!(spark.menu_override, Some(MenuOverride::named("Sparkle")));
        assert!(spark.has_default_constructor);

        let smoke = manifest.types[2].to_type_info();
        assert_eq!(smoke.menu_override, Some(MenuOverride::in_folder("", "")));
        assert!(manifest.types[0].to_type_info().menu_override.is_none());
    }

    #[test]
    fn catalog_from_manifest() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let catalog = build_catalog(&manifest).unwrap();
        let base = catalog.key_of("Game.IEffect").unwrap();
        assert_eq!(catalog.derived_from(base).len(), 2);
    }

    #[test]
    fn duplicate_type_fails() {
        let manifest = parse_manifest(
            r#"
            [[type]]
            name = "A"
            [[type]]
            name = "A"
            "#,
        )
        .unwrap();
        assert_eq!(
            build_catalog(&manifest).unwrap_err(),
            CatalogError::DuplicateType("A".into())
        );
    }

    #[test]
    fn sample_manifest_loads() {
        let manifest = parse_manifest(include_str!("../effects.toml")).unwrap();
        let catalog = build_catalog(&manifest).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(manifest.opaque_roots, vec!["Engine.Object".to_string()]);
        assert!(manifest.selector.unwrap().opaque_roots.is_empty());
    }

    #[test]
    fn top_level_opaque_roots() {
        let manifest = parse_manifest(
            r#"
            opaque_roots = ["Engine.Object", "Engine.Asset"]

            [selector]
            opaque_roots = ["Engine.Object"]

            [[type]]
            name = "A"
            "#,
        )
        .unwrap();
        assert_eq!(manifest.opaque_roots.len(), 2);

        let mut config = manifest.selector.clone().unwrap();
        manifest.apply_opaque_roots(&mut config);
        assert_eq!(config.opaque_roots, vec!["Engine.Object", "Engine.Asset"]);

        let mut config = SelectorConfig::default();
        manifest.apply_opaque_roots(&mut config);
        assert_eq!(config.opaque_roots, vec!["Engine.Object", "Engine.Asset"]);
    }

    #[test]
    fn unknown_field_fails() {
        assert!(parse_manifest("[[type]]\nname = \"A\"\nabstrct = true").is_err());
    }
}
