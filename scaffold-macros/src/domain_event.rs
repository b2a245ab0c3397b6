use crate::utils::{apply_derives, ensure_required_fields};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

const REQUIRED_FIELDS: [&str; 3] = ["id", "aggregate_root_id", "occurred_at"];

/// #[domain_event] 宏实现
/// - 仅支持具名字段结构体
/// - 确保具备字段：`id`、`aggregate_root_id`（均为 `UniqueId`）与 `occurred_at`
/// - 生成 `::scaffold_domain::domain_event::DomainEvent` 实现，事件名称默认取结构体名
/// - 生成 `new(aggregate_root_id, ..其余字段)`：自动生成事件标识并记录当前时间
/// - 支持：`#[domain_event(name = "...")]` 覆写事件名称
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let st = match &mut input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[domain_event] can only be used on struct types")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(
                st.span(),
                "#[domain_event] supports only named-field structs, e.g., struct X { a: T }",
            )
            .to_compile_error()
            .into();
        }
    };

    let id_ty: Type = syn::parse_quote! { ::scaffold_domain::identifier::UniqueId };
    let ts_ty: Type = syn::parse_quote! { ::scaffold_domain::domain_event::Timestamp };
    ensure_required_fields(
        fields_named,
        &[
            ("id", &id_ty),
            ("aggregate_root_id", &id_ty),
            ("occurred_at", &ts_ty),
        ],
        /*reposition_existing*/ false,
    );

    // 构造函数参数：除标识/时间外的业务字段，保持声明顺序
    let payload: Vec<(syn::Ident, Type)> = fields_named
        .named
        .iter()
        .filter_map(|f| f.ident.clone().map(|i| (i, f.ty.clone())))
        .filter(|(i, _)| !REQUIRED_FIELDS.iter().any(|r| i == r))
        .collect();
    let payload_args = payload.iter().map(|(i, ty)| quote! { #i: #ty });
    let payload_idents = payload.iter().map(|(i, _)| i);

    // 合并/追加默认派生：Debug, Clone, PartialEq, Serialize, Deserialize
    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut st.attrs, required);

    let ident = st.ident.clone();
    let vis = st.vis.clone();
    let generics = st.generics.clone();
    let name = cfg
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        #input

        impl #impl_generics #ident #ty_generics #where_clause {
            /// 以新事件标识与当前时间创建事件
            #vis fn new(
                aggregate_root_id: ::scaffold_domain::identifier::UniqueId,
                #( #payload_args ),*
            ) -> Self {
                Self {
                    id: ::scaffold_domain::identifier::UniqueId::generate(),
                    aggregate_root_id,
                    occurred_at: ::scaffold_domain::domain_event::now(),
                    #( #payload_idents ),*
                }
            }
        }

        impl #impl_generics ::scaffold_domain::domain_event::DomainEvent for #ident #ty_generics #where_clause {
            fn event_id(&self) -> &::scaffold_domain::identifier::UniqueId {
                &self.id
            }

            fn event_name(&self) -> &str {
                #name
            }

            fn occurred_at(&self) -> ::scaffold_domain::domain_event::Timestamp {
                self.occurred_at
            }

            fn aggregate_root_id(&self) -> &::scaffold_domain::identifier::UniqueId {
                &self.aggregate_root_id
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };

    TokenStream::from(out)
}

// 解析 domain_event 宏键值参数：name = "..."
struct EventAttrConfig {
    name: Option<LitStr>,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<LitStr> = None;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;
            match key.to_string().as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate key 'name' in attribute"));
                    }
                    name = Some(input.parse()?);
                }
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "unknown key in attribute; expected 'name'",
                    ));
                }
            }
            if !input.is_empty() {
                let _comma: Token![,] = input.parse()?;
            }
        }

        Ok(Self { name })
    }
}
