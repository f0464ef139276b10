use serde::Deserialize;

mod deps {
    pub use ortho_args;
}

/// Verifies that `#[arg_model(crate = "...")]` routes generated paths through
/// a re-export.
#[derive(Deserialize, ortho_args::ArgModel)]
#[arg_model(crate = "deps::ortho_args")]
struct Aliased {
    value: u32,
}

fn main() {
    let schema = <Aliased as deps::ortho_args::ArgModel>::schema();
    assert_eq!(schema.name(), "Aliased");
}
