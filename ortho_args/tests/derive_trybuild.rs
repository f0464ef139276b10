//! trybuild coverage for models declared with `#[derive(ArgModel)]`.
//!
//! Each case is compiled as a separate crate against the public API, so the
//! generated paths must resolve without any items in scope.

#[test]
fn derived_models_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/model_pass.rs");
    t.pass("tests/trybuild/crate_path_alias.rs");
}
