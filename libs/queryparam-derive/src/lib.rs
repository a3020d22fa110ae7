use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro for query-parameter record declarations.
///
/// Generates an implementation of `queryparam::Record` for the annotated
/// struct:
///
/// - `fields()` — a static table of field descriptors (name, type identity,
///   tag bag) in declaration order.
/// - `field_mut(index)` — a mutable `dyn Any` handle to the field at `index`.
///
/// Tags are declared with the `#[tag(...)]` helper attribute and are copied
/// into the descriptor verbatim — the macro does not interpret tag names, so
/// a `Parser` configured with custom tag names keeps working.
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct UserQuery {
///     #[tag(queryparam = "name")]
///     pub name: String,
///
///     #[tag(queryparam = "friends", queryparamdelim = "-")]
///     pub friends: Vec<String>,
///
///     // No tag: ignored by the parser.
///     pub internal: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record only supports structs",
            ))
        }
    };

    let mut descriptor_tokens = Vec::new();
    let mut field_mut_arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name_str = field_name.to_string();
        let field_ty = &field.ty;
        let type_name_str = type_name(field_ty);

        // Collect #[tag(key = "value", ...)] pairs. Keys are arbitrary —
        // the parser resolves them against its configured tag names at
        // decode time.
        let mut tag_tokens = Vec::new();
        for attr in &field.attrs {
            if !attr.path().is_ident("tag") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let key = meta
                    .path
                    .get_ident()
                    .ok_or_else(|| meta.error("expected `name = \"value\"`"))?
                    .to_string();
                let value: LitStr = meta.value()?.parse()?;
                let value = value.value();
                tag_tokens.push(quote! { (#key, #value) });
                Ok(())
            })?;
        }

        descriptor_tokens.push(quote! {
            ::queryparam::record::FieldDescriptor {
                name: #field_name_str,
                type_name: #type_name_str,
                ty: ::core::any::TypeId::of::<#field_ty>,
                tags: &[#(#tag_tokens),*],
            }
        });

        field_mut_arms.push(quote! {
            #index => &mut self.#field_name as &mut dyn ::core::any::Any,
        });
    }

    let expanded = quote! {
        impl ::queryparam::record::Record for #name {
            fn fields() -> &'static [::queryparam::record::FieldDescriptor] {
                const FIELDS: &[::queryparam::record::FieldDescriptor] = &[
                    #(#descriptor_tokens),*
                ];
                FIELDS
            }

            fn field_mut(&mut self, index: usize) -> &mut dyn ::core::any::Any {
                match index {
                    #(#field_mut_arms)*
                    _ => panic!("no field at index {index}"),
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

/// Render a field type for error messages (e.g. `Vec<String>`).
fn type_name(ty: &syn::Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" < ", "<")
        .replace(" > ", ">")
        .replace(" >", ">")
        .replace(" :: ", "::")
        .replace(" ,", ",")
}
