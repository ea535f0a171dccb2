//! Candidate discovery: which types may be assigned to a field of a given base type.

use polymorph_catalog::{TypeCatalog, TypeKey};

use crate::SelectorConfig;

/// Returns every type that can be picked for a field typed as `base`.
///
/// Candidates are the types deriving from `base`, plus `base` itself when
/// [`include_base`](SelectorConfig::include_base) is set. Abstract types,
/// open generic templates and anything under an
/// [`opaque_roots`](SelectorConfig::opaque_roots) entry are removed.
///
/// The result is sorted by full name and free of duplicates.
pub fn candidates(catalog: &TypeCatalog, base: TypeKey, config: &SelectorConfig) -> Vec<TypeKey> {
    let mut keys = catalog.derived_from(base);
    if config.include_base && catalog.info(base).is_some() {
        keys.push(base);
    }

    let mut result: Vec<(&str, TypeKey)> = keys
        .into_iter()
        .filter(|&key| is_eligible(catalog, key, config))
        .filter_map(|key| catalog.full_name(key).map(|name| (name, key)))
        .collect();

    result.sort_unstable();
    result.dedup_by_key(|(_, key)| *key);

    log::debug!(
        "Found {} candidates for {}",
        result.len(),
        catalog.full_name(base).unwrap_or("<unknown>")
    );

    result.into_iter().map(|(_, key)| key).collect()
}

/// Whether a single type passes the candidate filters.
pub fn is_eligible(catalog: &TypeCatalog, key: TypeKey, config: &SelectorConfig) -> bool {
    let Some(info) = catalog.info(key) else {
        return false;
    };
    !info.is_abstract
        && !info.is_generic_definition
        && !catalog.derives_from_any(key, &config.opaque_roots)
}
