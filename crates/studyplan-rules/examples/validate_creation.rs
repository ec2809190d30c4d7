use std::env;
use std::path::PathBuf;

use studyplan_rules::{CreationOptions, PlanDraft, validate_creation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut draft_path: Option<PathBuf> = None;
    let mut options = CreationOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--skip-contents" => {
                options = options.skip_contents();
            }
            _ => {
                if draft_path.is_none() {
                    draft_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let draft_path = draft_path.ok_or("missing draft path")?;
    let contents = std::fs::read_to_string(&draft_path)?;
    let draft: PlanDraft = serde_json::from_str(&contents)?;

    let result = validate_creation(&draft, &options)?;
    for message in &result.errors {
        eprintln!("error: {message}");
    }
    for message in &result.warnings {
        eprintln!("warning: {message}");
    }

    if !result.is_valid() {
        std::process::exit(1);
    }
    println!("draft validated successfully");
    Ok(())
}
