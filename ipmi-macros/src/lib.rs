/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

/// AsBytes: byte-level view of a #[repr(C)] wire record.
///
/// Generates `as_bytes()` for packing a response struct onto the wire and
/// `from_le_bytes()` for rebuilding one in tests. Fields must be integer
/// primitives or fixed arrays of them; the struct must be #[repr(C)] with
/// no padding between fields.
#[proc_macro_derive(AsBytes)]
pub fn derive_as_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(name, "AsBytes requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "AsBytes only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let field_parsers = fields.iter().map(|f| {
        let ident = f.ident.as_ref().expect("named field");
        let ty = &f.ty;

        match ty {
            // 定长数组字段，例如 [u8; 4]
            Type::Array(arr) => {
                let elem_ty = &arr.elem;
                let len = &arr.len;
                quote! {
                    #ident: {
                        let elem_size = std::mem::size_of::<#elem_ty>();
                        let total = elem_size * #len;
                        let part = bytes
                            .get(offset..offset + total)
                            .ok_or("not enough bytes for array field")?;
                        offset += total;

                        let mut arr = [<#elem_ty>::default(); #len];
                        for i in 0..#len {
                            let elem = &part[i * elem_size..(i + 1) * elem_size];
                            arr[i] = <#elem_ty>::from_le_bytes(elem.try_into().unwrap());
                        }
                        arr
                    },
                }
            }
            // 基本整数字段
            _ => quote! {
                #ident: {
                    let size = std::mem::size_of::<#ty>();
                    let part = bytes
                        .get(offset..offset + size)
                        .ok_or("not enough bytes for field")?;
                    offset += size;
                    <#ty>::from_le_bytes(part.try_into().unwrap())
                },
            },
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
                let mut offset = 0usize;

                if bytes.len() < std::mem::size_of::<Self>() {
                    return Err("Input bytes too short");
                }

                Ok(Self {
                    #(#field_parsers)*
                })
            }

            pub fn as_bytes(&self) -> &[u8] {
                unsafe {
                    std::slice::from_raw_parts(
                        self as *const _ as *const u8,
                        std::mem::size_of_val(self),
                    )
                }
            }
        }
    };
    TokenStream::from(expanded)
}
