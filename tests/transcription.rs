use std::{fs, io::BufReader, path::Path};

use anyhow::Result;

use manuscript_words::{
    output::{save_report, save_summary_json, save_word_table},
    transcription::{
        builder::parse_transcription,
        report::{summarize, RunSummary, DEFAULT_TOP_TOKENS},
        stats::MAX_AMBIGUOUS_EXAMPLES,
        tag::UNGROUPED_FOLIO,
    },
};

static TRANSCRIPTION: &str = "\
<f1r.P1.1;H> fachys ykal ar ataiin shol shory cth*res y kor sholdy
<f1r.P1.2;H> sory ckhar or y kair chtaiin shar are cthar cthar dan

<f1r.P1.3;H> H>syaiir sheky or ykaiin shod cthoary cthes daraiin sa
<f1r.P1.4;H>
<f1v.P.1;C> kchsy chadaiin.... kshal cthey daiin
untagged line with daiin
<f2r.P1.1> ... [ooiin] d!aiin
";

#[test]
fn test_transcription_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("takeshi.txt");
    fs::write(&input, TRANSCRIPTION)?;

    let parsed = parse_transcription(BufReader::new(fs::File::open(&input)?))?;
    let stats = &parsed.stats;

    assert_eq!(stats.total_lines, 8);
    assert_eq!(stats.blank_lines, 1);
    assert_eq!(stats.untagged_lines, 1);
    assert_eq!(stats.total_tagged_lines, 6);
    assert_eq!(stats.removed_leading_marker, 1);
    assert_eq!(stats.total_words, 10 + 11 + 9 + 5 + 4 + 3);
    // 語の無い行 (f1r.P1.4) の分だけ語数より 1 多い
    assert_eq!(parsed.records.len(), stats.total_words + 1);
    assert_eq!(stats.words_with_markup, 3);
    assert_eq!(
        stats.folios.iter().map(String::as_str).collect::<Vec<_>>(),
        vec![UNGROUPED_FOLIO, "f1r", "f1v", "f2r"]
    );
    assert_eq!(stats.top_tokens(2), vec![("y", 2), ("or", 2)]);
    assert!(stats.ambiguous_examples.len() <= MAX_AMBIGUOUS_EXAMPLES);

    let csv_path = dir.path().join("out/words.csv");
    let log_path = dir.path().join("logs/log.txt");
    let json_path = dir.path().join("out/summary.json");
    save_word_table(&csv_path, &parsed.records)?;
    save_report(&log_path, &summarize(&input, &parsed, DEFAULT_TOP_TOKENS))?;
    save_summary_json(&json_path, &RunSummary::new(&input, &parsed, 5))?;

    let mut reader = csv::Reader::from_path(&csv_path)?;
    assert_eq!(
        reader.headers()?.iter().collect::<Vec<_>>(),
        vec![
            "folio",
            "tag",
            "meta_left",
            "scribal",
            "line_text",
            "word_index",
            "original_word",
            "cleaned_word",
            "unified_word",
            "has_markup",
            "ambiguity_notes",
        ]
    );
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(rows.len(), parsed.records.len());

    let marked = rows.iter().find(|r| &r[6] == "cth*res").unwrap();
    assert_eq!(&marked[0], "f1r");
    assert_eq!(&marked[3], "H");
    assert_eq!(&marked[5], "7");
    assert_eq!(&marked[7], "cthres");
    assert_eq!(&marked[9], "true");
    assert_eq!(
        &marked[10],
        "contains_*;markup_removed;changed_by_cleaning"
    );

    let empty = rows.iter().find(|r| &r[1] == "f1r.P1.4;H").unwrap();
    assert_eq!(&empty[5], "");
    assert_eq!(&empty[6], "");
    assert_eq!(&empty[9], "false");

    let stripped = rows.iter().find(|r| &r[6] == "syaiir").unwrap();
    assert_eq!(&stripped[4], "syaiir sheky or ykaiin shod cthoary cthes daraiin sa");

    let report = fs::read_to_string(&log_path)?;
    assert!(report.starts_with(&format!("Source file: {}\n", input.display())));
    assert!(report.contains("Total word-level rows: 43\n"));
    assert!(report.contains(&format!("  {:30} -> {:30} ; {}", "...", "<empty>", "empty_after_clean")));

    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(summary["rows"], 43);
    assert_eq!(summary["top_tokens"].as_array().map(Vec::len), Some(5));

    Ok(())
}

#[test]
fn test_empty_input_still_has_header() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let parsed = parse_transcription("\n  \n".as_bytes())?;
    assert!(parsed.records.is_empty());
    assert_eq!(parsed.stats.blank_lines, 2);

    let csv_path = dir.path().join("words.csv");
    save_word_table(&csv_path, &parsed.records)?;
    assert_eq!(
        fs::read_to_string(&csv_path)?,
        "folio,tag,meta_left,scribal,line_text,word_index,original_word,cleaned_word,unified_word,has_markup,ambiguity_notes\n"
    );

    let report = summarize(Path::new("empty.txt"), &parsed, DEFAULT_TOP_TOKENS);
    assert!(report.contains(&"Unique folios found: 0".to_owned()));

    Ok(())
}
