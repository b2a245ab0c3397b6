use crate::utils::{apply_derives, derives_serde, ensure_required_fields, find_field};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[entity] 宏实现
/// - 若缺失则追加字段：`id`、`created_at`、`updated_at`、`deleted_at`，并置于字段最前
/// - 自动实现 `::scaffold_domain::entity::Entity`
/// - `aggregate_root`：追加 `pending_events` 字段并实现 `AggregateRoot`
/// - 支持参数：`#[entity(id = IdType, debug = true|false, aggregate_root)]`；
///   - `id` 默认 `::scaffold_domain::identifier::UniqueId`
///   - `debug` 默认 `true`（派生 Debug）。当为 `false` 时不派生 Debug，便于用户自定义实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    if cfg.aggregate_root && cfg.id_ty.is_some() {
        return syn::Error::new(
            st.ident.span(),
            "aggregate roots are identified by UniqueId; remove the 'id' key",
        )
        .to_compile_error()
        .into();
    }

    let serde_derived = derives_serde(&st.attrs);

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg
        .id_ty
        .unwrap_or_else(|| syn::parse_quote! { ::scaffold_domain::identifier::UniqueId });
    let created_ty: Type = syn::parse_quote! { Option<::scaffold_domain::value_object::CreatedAt> };
    let updated_ty: Type = syn::parse_quote! { Option<::scaffold_domain::value_object::UpdatedAt> };
    let deleted_ty: Type = syn::parse_quote! { Option<::scaffold_domain::value_object::DeletedAt> };

    // 重新组织字段：确保标识与时间戳在最前，并避免重复
    ensure_required_fields(
        fields_named,
        &[
            ("id", &id_type),
            ("created_at", &created_ty),
            ("updated_at", &updated_ty),
            ("deleted_at", &deleted_ty),
        ],
        /*reposition_existing*/ true,
    );

    if cfg.aggregate_root && find_field(&fields_named.named, "pending_events").is_none() {
        let field: syn::Field = if serde_derived {
            syn::parse_quote! {
                #[serde(skip)]
                pending_events: ::scaffold_domain::domain_event::PendingEvents
            }
        } else {
            syn::parse_quote! { pending_events: ::scaffold_domain::domain_event::PendingEvents }
        };
        fields_named.named.push(field);
    }

    let mut required: Vec<syn::Path> = Vec::new();
    if cfg.derive_debug.unwrap_or(true) {
        required.push(syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let aggregate_impl = cfg.aggregate_root.then(|| {
        quote! {
            impl #impl_generics ::scaffold_domain::aggregate_root::AggregateRoot for #ident #ty_generics #where_clause {
                fn pending_events(&self) -> &::scaffold_domain::domain_event::PendingEvents {
                    &self.pending_events
                }

                fn pending_events_mut(&mut self) -> &mut ::scaffold_domain::domain_event::PendingEvents {
                    &mut self.pending_events
                }
            }
        }
    });

    let expanded = quote! {
        #st

        impl #impl_generics ::scaffold_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn id(&self) -> &Self::Id { &self.id }

            fn created_at(&self) -> Option<&::scaffold_domain::value_object::CreatedAt> {
                self.created_at.as_ref()
            }

            fn updated_at(&self) -> Option<&::scaffold_domain::value_object::UpdatedAt> {
                self.updated_at.as_ref()
            }

            fn deleted_at(&self) -> Option<&::scaffold_domain::value_object::DeletedAt> {
                self.deleted_at.as_ref()
            }
        }

        #aggregate_impl
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

#[derive(Default)]
struct EntityAttrConfig {
    id_ty: Option<Type>,
    derive_debug: Option<bool>,
    aggregate_root: bool,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();

        if input.is_empty() {
            return Ok(cfg);
        }

        let elems: Punctuated<EntityAttrElem, Token![,]> =
            Punctuated::<EntityAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                EntityAttrElem::Id(ty) => {
                    if cfg.id_ty.is_some() {
                        return Err(syn::Error::new(ty.span(), "duplicate key 'id' in attribute"));
                    }
                    cfg.id_ty = Some(*ty);
                }
                EntityAttrElem::Debug(b) => {
                    if cfg.derive_debug.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                    cfg.derive_debug = Some(b);
                }
                EntityAttrElem::AggregateRoot => cfg.aggregate_root = true,
            }
        }

        Ok(cfg)
    }
}

enum EntityAttrElem {
    Id(Box<Type>),
    Debug(bool),
    AggregateRoot,
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key == "id" {
            let _eq: Token![=] = input.parse()?;
            let ty: Type = input.parse()?;
            Ok(EntityAttrElem::Id(Box::new(ty)))
        } else if key == "debug" {
            let _eq: Token![=] = input.parse()?;
            let lit: syn::LitBool = input.parse()?;
            Ok(EntityAttrElem::Debug(lit.value()))
        } else if key == "aggregate_root" {
            Ok(EntityAttrElem::AggregateRoot)
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'id', 'debug' or 'aggregate_root'",
            ))
        }
    }
}
