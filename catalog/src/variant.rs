//! The [`Variant`] trait implemented by types that can fill a polymorphic field.

use crate::TypeInfo;

/// A Rust type that can be listed in a type selector.
///
/// Use `#[derive(Variant)]` to implement the trait from the type's name and
/// module path. Menu overrides, supertypes and flags are given with the
/// `#[variant(...)]` attribute:
///
/// ```ignore
/// #[derive(Default, Variant)]
/// #[variant(base = "game.Weapon", name = "Big Sword", folder = "Melee/Heavy")]
/// struct Claymore {
///     damage: f32,
/// }
/// ```
///
/// # Manual implementation
///
/// ```
/// use polymorph_catalog::{TypeInfo, Variant};
///
/// struct Fireball;
///
/// impl Variant for Fireball {
///     fn type_info() -> TypeInfo {
///         TypeInfo::new("game.spells.Fireball").with_base("game.Spell")
///     }
/// }
///
/// assert_eq!(Fireball::type_info().name, "Fireball");
/// ```
pub trait Variant: Send + Sync + 'static {
    /// Build the reflection data for this type.
    fn type_info() -> TypeInfo;
}
