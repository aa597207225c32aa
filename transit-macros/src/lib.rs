use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Index};

/// Derive macro implementing `transit::animation::Animatable` field by field.
///
/// Every field must itself be `Animatable`. The generated `lerp` interpolates
/// each field independently with the same factor, which is what colors,
/// points and other component-wise values need.
///
/// # Example
/// ```ignore
/// #[derive(Clone, PartialEq, Animatable)]
/// struct Offset {
///     dx: f32,
///     dy: f32,
/// }
///
/// let mid = Offset::lerp(&Offset { dx: 0.0, dy: 0.0 }, &Offset { dx: 10.0, dy: 4.0 }, 0.5);
/// ```
#[proc_macro_derive(Animatable)]
pub fn derive_animatable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return syn::Error::new_spanned(
                struct_name,
                "Animatable can only be derived for structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let body = match fields {
        Fields::Named(fields) => {
            let inits = fields.named.iter().map(|field| {
                let name = field.ident.as_ref().unwrap();
                quote! {
                    #name: ::transit::animation::Animatable::lerp(&from.#name, &to.#name, t)
                }
            });
            quote! { Self { #(#inits,)* } }
        }
        Fields::Unnamed(fields) => {
            let inits = (0..fields.unnamed.len()).map(|i| {
                let index = Index::from(i);
                quote! {
                    ::transit::animation::Animatable::lerp(&from.#index, &to.#index, t)
                }
            });
            quote! { Self(#(#inits,)*) }
        }
        Fields::Unit => quote! {
            {
                let _ = (from, to, t);
                Self
            }
        },
    };

    let expanded = quote! {
        impl #impl_generics ::transit::animation::Animatable for #struct_name #ty_generics #where_clause {
            fn lerp(from: &Self, to: &Self, t: f32) -> Self {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}
