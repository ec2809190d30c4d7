use studyplan_rules::plan_draft_json_schema;

fn main() {
    let schema = plan_draft_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize draft json schema");
    println!("{json}");
}
