use serde::Deserialize;

#[derive(Deserialize, ortho_args::ArgModel)]
struct Group {
    /// Group member.
    member: Option<String>,
}

#[derive(Deserialize, ortho_args::ArgModel)]
#[arg_model(subcommand, description = "Do the thing.")]
struct Act {
    #[arg_model(default = 2, short = 't')]
    times: u8,
}

#[derive(Deserialize, ortho_args::ArgModel)]
#[serde(rename_all = "kebab-case")]
struct Root {
    #[arg_model(title = "label", alias = "tag", description = "A label.")]
    label_text: Option<String>,
    group: Option<Group>,
    act: Option<Act>,
}

fn main() {
    let schema = <Root as ortho_args::ArgModel>::schema();
    assert_eq!(schema.fields().count(), 3);
    let _: ortho_args::Annotation = <Act as ortho_args::Annotate>::annotation();
}
