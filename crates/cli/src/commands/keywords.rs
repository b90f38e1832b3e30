use anyhow::Result;
use scopehint_core::KeywordVocabulary;

pub fn keywords_command(prefix: Option<&str>, json: bool) -> Result<()> {
    let prefix = prefix.unwrap_or("");
    let words: Vec<(&str, f64)> = KeywordVocabulary::javascript()
        .iter()
        .filter(|(word, _)| word.starts_with(prefix))
        .collect();

    if json {
        let entries: Vec<_> = words
            .iter()
            .map(|(word, weight)| serde_json::json!({ "name": word, "weight": weight }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (word, weight) in words {
        println!("{word:<12} {weight:>6}");
    }
    Ok(())
}
