/*!
 * Unit tests for sequential-cue parsing and reassembly
 */

use subtrans::batch;
use subtrans::srt::SrtDocument;

use crate::common;

#[test]
fn test_parse_withStripping_shouldExtractDialogueOnly() {
    let lines = common::to_lines(common::sample_srt_content());
    let doc = SrtDocument::parse(&lines, true);

    assert_eq!(doc.fragments.len(), 2);
    assert_eq!(doc.fragments[0].position, 2);
    assert_eq!(doc.fragments[0].text, "Hello there.");
    assert_eq!(doc.fragments[1].position, 6);
    assert_eq!(doc.fragments[1].text, "How are you /// doing today?");
}

#[test]
fn test_parse_withoutStripping_shouldKeepCaptionFragment() {
    let lines = common::to_lines(common::sample_srt_content());
    let doc = SrtDocument::parse(&lines, false);

    assert_eq!(doc.fragments.len(), 3);
    assert_eq!(doc.fragments[2].position, 11);
    assert_eq!(doc.fragments[2].text, "[door slams]");
}

#[test]
fn test_parse_shouldNeverMutateOriginals() {
    let lines = common::to_lines(common::sample_srt_content());
    let doc = SrtDocument::parse(&lines, true);
    assert_eq!(doc.originals, lines);
}

#[test]
fn test_merge_shouldRestoreMultiLineCues() {
    let lines = common::to_lines(common::sample_srt_content());
    let mut doc = SrtDocument::parse(&lines, true);

    let batches: Vec<String> = batch::pack(&doc.fragments, batch::BATCH_CHAR_LIMIT)
        .into_iter()
        .map(|b| b.to_uppercase())
        .collect();
    doc.merge(&batches);

    assert_eq!(doc.originals[2], "HELLO THERE.");
    assert_eq!(doc.originals[6], "HOW ARE YOU");
    assert_eq!(doc.originals[7], "DOING TODAY?");
    // structural lines untouched
    assert_eq!(doc.originals[0], "1");
    assert_eq!(doc.originals[1], "00:00:01,000 --> 00:00:04,000");
    // caption and music untouched
    assert_eq!(doc.originals[11], "[door slams]");
    assert_eq!(doc.originals[15], "♪ la la la ♪");
}

#[test]
fn test_merge_withShuffledBatchOrder_shouldStillLandByTag() {
    let lines = common::to_lines(common::sample_srt_content());
    let mut doc = SrtDocument::parse(&lines, true);

    // two single-fragment batches handed back in reverse order
    let batches = vec![
        doc.fragments[1].serialize().to_uppercase(),
        doc.fragments[0].serialize().to_uppercase(),
    ];
    doc.merge(&batches);

    assert_eq!(doc.originals[2], "HELLO THERE.");
    assert_eq!(doc.originals[6], "HOW ARE YOU");
}

#[test]
fn test_merge_withGarbageLines_shouldIgnoreThem() {
    let lines = common::to_lines(common::sample_srt_content());
    let mut doc = SrtDocument::parse(&lines, true);
    let before = doc.originals.clone();

    doc.merge(&["no tag here\n999;out of range\nabc;bad id".to_string()]);

    // out-of-range and untagged lines are dropped silently
    assert_eq!(doc.originals, before);
}

#[test]
fn test_parse_shouldProduceStrictlyIncreasingPositions() {
    let mut content = String::new();
    for i in 0..30 {
        content.push_str(&format!(
            "{}\n00:00:{:02},000 --> 00:00:{:02},500\nline {}\nmore {}\n\n",
            i + 1,
            i,
            i,
            i,
            i
        ));
    }
    let doc = SrtDocument::parse(&common::to_lines(&content), true);

    assert_eq!(doc.fragments.len(), 30);
    let positions: Vec<usize> = doc.fragments.iter().map(|f| f.position).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(positions.iter().all(|&p| p < doc.originals.len()));
}

#[test]
fn test_parse_withUnterminatedLastCue_shouldFlushAtEof() {
    let lines = common::to_lines("1\n00:00:01,000 --> 00:00:02,000\nBye now");
    let doc = SrtDocument::parse(&lines, true);
    assert_eq!(doc.fragments.len(), 1);
    assert_eq!(doc.fragments[0].position, 2);
    assert_eq!(doc.fragments[0].text, "Bye now");
}
