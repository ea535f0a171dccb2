use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, LitStr, parse_macro_input};

/// Derive the `Variant` trait, providing the type's catalog descriptor.
///
/// The type name is the struct or enum identifier. The namespace defaults
/// to the defining module path with `::` replaced by `.`.
///
/// # Attributes
///
/// ```ignore
/// #[derive(Default, Variant)]
/// #[variant(
///     namespace = "game.weapons",   // replaces the module-path namespace
///     base = "game.Weapon",         // repeatable: direct supertypes
///     name = "Big Sword",           // menu display name
///     folder = "Melee/Heavy",       // menu folder ("" = top level)
/// )]
/// struct Claymore {
///     damage: f32,
/// }
/// ```
///
/// `abstract_type` marks a type that is only used as a field type and is
/// never offered as a choice:
///
/// ```ignore
/// #[derive(Variant)]
/// #[variant(abstract_type)]
/// struct Weapon;
/// ```
#[proc_macro_derive(Variant, attributes(variant))]
pub fn derive_variant(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let name_str = name.to_string();

    if let Data::Union(_) = &input.data {
        return syn::Error::new_spanned(
            &input.ident,
            "Variant can only be derived for structs and enums",
        )
        .to_compile_error()
        .into();
    }

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "Variant cannot be derived for generic types; implement it for each concrete instantiation",
        )
        .to_compile_error()
        .into();
    }

    let attrs = match parse_variant_attrs(&input) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    let namespace = namespace_expr(&attrs);

    let bases = attrs.bases.iter().map(|base| {
        quote! { .with_base(#base) }
    });

    let abstract_type = if attrs.is_abstract {
        quote! { .abstract_type() }
    } else {
        quote! {}
    };

    let menu_override = menu_override_call(&attrs);

    let expanded = quote! {
        impl polymorph_catalog::Variant for #name {
            fn type_info() -> polymorph_catalog::TypeInfo {
                polymorph_catalog::TypeInfo::new(#name_str)
                    .in_namespace(#namespace)
                    #(#bases)*
                    #abstract_type
                    #menu_override
            }
        }
    };

    expanded.into()
}

/// Expression producing the namespace `String`.
fn namespace_expr(attrs: &VariantAttrs) -> proc_macro2::TokenStream {
    match &attrs.namespace {
        Some(ns) => quote! { ::std::string::String::from(#ns) },
        None => quote! { ::core::module_path!().replace("::", ".") },
    }
}

/// `.with_override(...)` builder call, empty when neither `name` nor `folder` is given.
fn menu_override_call(attrs: &VariantAttrs) -> proc_macro2::TokenStream {
    if attrs.menu_name.is_none() && attrs.folder.is_none() {
        return proc_macro2::TokenStream::new();
    }

    let menu_name = attrs.menu_name.clone().unwrap_or_default();
    let folder = match &attrs.folder {
        Some(folder) => quote! {
            ::core::option::Option::Some(::std::string::String::from(#folder))
        },
        None => quote! { ::core::option::Option::None },
    };
    quote! {
        .with_override(polymorph_catalog::MenuOverride {
            name: ::std::string::String::from(#menu_name),
            folder: #folder,
        })
    }
}

/// Parsed contents of all `#[variant(...)]` attributes on the type.
#[derive(Default)]
struct VariantAttrs {
    namespace: Option<String>,
    bases: Vec<String>,
    menu_name: Option<String>,
    folder: Option<String>,
    is_abstract: bool,
}

fn parse_variant_attrs(input: &DeriveInput) -> syn::Result<VariantAttrs> {
    let mut attrs = VariantAttrs::default();

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("variant")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                attrs.namespace = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("base") {
                attrs.bases.push(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("name") {
                attrs.menu_name = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("folder") {
                attrs.folder = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("abstract_type") {
                attrs.is_abstract = true;
            } else {
                return Err(meta.error(
                    "unknown variant attribute; expected one of: namespace, base, name, folder, abstract_type",
                ));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}
