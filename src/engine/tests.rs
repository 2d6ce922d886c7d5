use super::*;

fn record(id: i64, title: &str, content: &str) -> ArticleRecord {
    ArticleRecord {
        id,
        consultation_id: 1,
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn reassemble(chunks: &[ArticleChunk]) -> String {
    chunks
        .iter()
        .flat_map(|chunk| [chunk.header_line.as_str(), chunk.body.as_str()])
        .collect()
}

fn chunk_numbers(chunks: &[ArticleChunk]) -> Vec<u32> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.article_number)
        .collect()
}

fn header_numbers(text: &str) -> Vec<u32> {
    get_true_main_article_header_locations(text)
        .iter()
        .map(|header| header.article_number)
        .collect()
}

#[test]
fn header_grammar_accepts_decorated_forms() {
    let header = parse_article_header("Άρθρο 5").expect("plain header");
    assert_eq!(header.main_number, 5);
    assert_eq!(header.alpha_suffix, None);
    assert!(!header.is_paragraph_reference());

    let header = parse_article_header("**Άρθρο 12:**").expect("bold header with colon");
    assert_eq!(header.main_number, 12);

    let header = parse_article_header("### - Άρθρο 3 Α").expect("list marker and suffix");
    assert_eq!(header.main_number, 3);
    assert_eq!(header.alpha_suffix.as_deref(), Some("Α"));

    let header = parse_article_header("Άρθρ**ο** 9").expect("markup before final letter");
    assert_eq!(header.main_number, 9);

    let header = parse_article_header("Ά ρθρο 2.").expect("split keyword");
    assert_eq!(header.main_number, 2);

    let header = parse_article_header("«Άρθρο 4»").expect("quoted header is still well formed");
    assert_eq!(header.main_number, 4);
}

#[test]
fn header_grammar_reads_number_through_markup() {
    let header = parse_article_header("Άρθρο 1****18").expect("interleaved markup");
    assert_eq!(header.main_number, 118);
    assert_eq!(header.raw_number_text, "1****18");
}

#[test]
fn header_grammar_rejects_non_headers() {
    assert!(parse_article_header("άρθρο 5").is_none());
    assert!(parse_article_header("Κεφάλαιο Α - Άρθρο 1").is_none());
    assert!(parse_article_header("Άρ**θρ**ο 5").is_none());
    assert!(parse_article_header("Άρθρο πρώτο").is_none());
    assert!(parse_article_header("Άρθρο 0").is_none());
    assert!(parse_article_header("Άρθρον 5").is_none());
}

#[test]
fn header_grammar_is_deterministic() {
    for line in ["Άρθρο 7 παρ. 2", "Άρθρα 245 – 250", "**Άρθρο 1****18**"] {
        assert_eq!(parse_article_header(line), parse_article_header(line));
    }
}

#[test]
fn suffix_attached_to_the_number_is_captured() {
    let header = parse_article_header("Άρθρο 1Α").expect("inserted article");
    assert_eq!(header.main_number, 1);
    assert_eq!(header.alpha_suffix.as_deref(), Some("Α"));

    let header = parse_article_header("Άρθρο 6 ΣΤ:").expect("two letter suffix");
    assert_eq!(header.alpha_suffix.as_deref(), Some("ΣΤ"));
}

#[test]
fn every_parsed_header_is_a_start_of_line_mention() {
    for line in [
        "Άρθρο 5",
        "  **Άρθρο 12:**",
        "### - Άρθρο 3 Α",
        "«Άρθρο 4»",
        "Άρθρα 245 – 250",
        "Κεφάλαιο Α - Άρθρο 1",
        "Στο Άρθρο 5",
    ] {
        let parsed = parse_article_header(line);
        let mentions = find_all_article_mentions(line);
        let first_at_line_start = mentions.first().filter(|mention| mention.is_start_of_line);
        assert_eq!(
            parsed.as_ref(),
            first_at_line_start.map(|mention| &mention.parsed_details),
            "line {line:?}"
        );
    }
}

#[test]
fn suffix_is_not_taken_from_a_following_title_word() {
    let header = parse_article_header("Άρθρο 3 Ορισμοί").expect("header with title");
    assert_eq!(header.alpha_suffix, None);

    let header = parse_article_header("Άρθρο 3 ΑΒΓ").expect("header with acronym");
    assert_eq!(header.alpha_suffix, None);
}

#[test]
fn paragraph_and_range_details_are_parsed() {
    let header = parse_article_header("Άρθρο 7 παρ. 2").expect("paragraph reference");
    assert_eq!(header.paragraph_id.as_deref(), Some("2"));
    assert!(header.is_paragraph_reference());

    let header = parse_article_header("Άρθρο 7, παράγραφος 3").expect("long paragraph marker");
    assert_eq!(header.paragraph_id.as_deref(), Some("3"));

    let header = parse_article_header("Άρθρα 245 – 250").expect("range");
    assert!(header.is_range);
    assert_eq!(header.range_end, Some(250));
    assert_eq!(header.covered_numbers(), 245..=250);

    let header = parse_article_header("Άρθρα 10 - 5").expect("backwards range");
    assert!(!header.is_range);
    assert_eq!(header.covered_numbers(), 10..=10);
}

#[test]
fn scanner_finds_inline_and_quoted_mentions() {
    let mentions = find_all_article_mentions("Στο Άρθρο 5 και στο «Άρθρο 6»\n## Άρθρο 7");
    assert_eq!(mentions.len(), 3);

    assert_eq!(mentions[0].article_number(), 5);
    assert_eq!(mentions[0].char_offset_in_line, 4);
    assert!(!mentions[0].is_start_of_line);
    assert!(!mentions[0].is_quoted);

    assert_eq!(mentions[1].article_number(), 6);
    assert!(mentions[1].is_quoted);

    assert_eq!(mentions[2].position(), (1, 3));
    assert!(mentions[2].is_start_of_line);
}

#[test]
fn scanner_does_not_mark_a_later_keyword_as_line_start() {
    let mentions = find_all_article_mentions("Κεφάλαιο Α - Άρθρο 1");
    assert_eq!(mentions.len(), 1);
    assert!(!mentions[0].is_start_of_line);
    assert!(header_numbers("Κεφάλαιο Α - Άρθρο 1").is_empty());
}

#[test]
fn locator_skips_quoted_paragraph_and_range_lines() {
    let text = "Άρθρο 1\n«Άρθρο 2»\nΆρθρο 3 παρ. 1\nΆρθρα 4 - 6\nΆρθρο 7\n";
    assert_eq!(header_numbers(text), vec![1, 7]);
}

#[test]
fn locator_promotes_ranges_on_request() {
    let text = "Άρθρα 245 – 250\nΚαταργούνται.\nΆρθρο 251\n";
    let mentions = find_all_article_mentions(text);
    let options = LocatorOptions {
        include_range_headers: true,
        ..LocatorOptions::default()
    };
    let headers = locate_true_headers(text, &mentions, &options);
    let numbers = headers
        .iter()
        .map(|header| header.article_number)
        .collect::<Vec<u32>>();
    assert_eq!(numbers, vec![245, 251]);
}

#[test]
fn locator_ignores_index_lines() {
    let text = "Άρθρο 1 ........ 3\nΆρθρο 2 ........ 5\nΆρθρο 1\nκείμενο\n";
    let mentions = find_all_article_mentions(text);
    let options = LocatorOptions {
        index_lines: [0, 1].into_iter().collect(),
        ..LocatorOptions::default()
    };
    let headers = locate_true_headers(text, &mentions, &options);
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].line_index(), 2);
    assert_eq!(headers[0].original_line_text, "Άρθρο 1");
}

#[test]
fn locator_tracks_multi_line_quote_blocks_on_request() {
    let text = "«Η διάταξη έχει ως εξής:\nΆρθρο 9\nκείμενο»\nΆρθρο 10\n";
    assert_eq!(header_numbers(text), vec![9, 10]);

    let mentions = find_all_article_mentions(text);
    let options = LocatorOptions {
        track_quote_blocks: true,
        ..LocatorOptions::default()
    };
    let headers = locate_true_headers(text, &mentions, &options);
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].article_number, 10);
}

#[test]
fn header_lines_are_strictly_increasing() {
    let text = "Άρθρο 1 Άρθρο 2\nκείμενο\nΆρθρο 3\nΆρθρο 4\n";
    let headers = get_true_main_article_header_locations(text);
    assert_eq!(headers.len(), 3);
    assert!(
        headers
            .windows(2)
            .all(|pair| pair[0].line_index() < pair[1].line_index())
    );
    assert_eq!(headers[0].article_number, 1);
}

#[test]
fn gap_filler_prefers_start_of_line_over_earlier_quote() {
    let text = "Εισαγωγή «Άρθρο 7» παραπομπή\nκείμενο\nΆρθρο 7 παρ. 2 ορίζει\n";
    let fill = fill_missing(text, &[7]);
    assert!(fill.still_missing.is_empty());
    assert_eq!(fill.found.len(), 1);
    assert_eq!(fill.found[0].priority, MentionPriority::StartOfLine);
    assert_eq!(fill.found[0].mention.line_index, 2);
}

#[test]
fn gap_filler_breaks_ties_by_first_occurrence() {
    let text = "Το Άρθρο 5 πρώτα\nκαι πάλι το Άρθρο 5\n";
    let fill = fill_missing(text, &[5, 6]);
    assert_eq!(fill.found_numbers(), vec![5]);
    assert_eq!(fill.found[0].priority, MentionPriority::Inline);
    assert_eq!(fill.found[0].mention.line_index, 0);
    assert_eq!(fill.still_missing, vec![6]);
}

#[test]
fn gap_filler_handles_empty_inputs() {
    assert_eq!(fill_missing("", &[1, 2]).still_missing, vec![1, 2]);
    assert!(fill_missing("Άρθρο 1", &[]).found.is_empty());
}

#[test]
fn title_range_and_internal_gaps() {
    assert_eq!(title_range("Ρυθμίσεις (10-12)"), vec![10, 11, 12]);
    assert_eq!(title_range("Ρυθμίσεις (άρθρα 1 – 3)"), vec![1, 2, 3]);
    assert!(title_range("Ρυθμίσεις (5-2)").is_empty());
    assert!(title_range("Χωρίς εύρος").is_empty());

    assert_eq!(internal_gaps(&[1, 4, 5, 7]), vec![2..=3, 6..=6]);
    assert!(internal_gaps(&[3]).is_empty());
}

#[test]
fn integrity_reports_missing_numbers() {
    let report = check_sequence_integrity(&[1, 2, 4]);
    assert!(!report.forms_single_continuous_sequence);
    assert_eq!(report.missing_numbers, vec![3]);

    assert!(check_sequence_integrity(&[]).forms_single_continuous_sequence);
    assert!(check_sequence_integrity(&[9]).forms_single_continuous_sequence);

    let report = check_sequence_integrity(&[3, 1, 2]);
    assert!(report.forms_single_continuous_sequence);
    assert!(!report.reads_in_order);
}

#[test]
fn chunks_cover_the_text_exactly() {
    let text = "Προοίμιο\nΆρθρο 1\nα\nΆρθρο 2\nβ";
    let headers = get_true_main_article_header_locations(text);
    let chunks = reconstruct_chunks(text, &headers, &[]);

    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].is_preamble());
    assert_eq!(chunks[0].body, "Προοίμιο\n");
    assert_eq!(chunks[1].article_number, Some(1));
    assert_eq!(chunks[1].header_line, "Άρθρο 1");
    assert_eq!(chunks[1].body_text(), "α\n");
    assert_eq!(chunks[2].body_text(), "β");
    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn chunking_is_idempotent() {
    let text = "Άρθρο 1\r\nα\r\n\r\nΆρθρο 2\r\nβ\r\n";
    let headers = get_true_main_article_header_locations(text);
    let chunks = reconstruct_chunks(text, &headers, &[]);
    let rebuilt = reassemble(&chunks);
    assert_eq!(rebuilt, text);

    let again = reconstruct_chunks(
        &rebuilt,
        &get_true_main_article_header_locations(&rebuilt),
        &[],
    );
    assert_eq!(again, chunks);
}

#[test]
fn text_without_headers_is_a_single_preamble() {
    let chunks = reconstruct_chunks("μόνο κείμενο\n", &[], &[]);
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].is_preamble());
    assert!(reconstruct_chunks("", &[], &[]).is_empty());
}

#[test]
fn title_range_completion_adds_positional_boundary() {
    let text = "Άρθρο 1\nΌπως ορίζει το Άρθρο 2 σήμερα\nΆρθρο 3\n";
    let analysis = analyse_document(1, "Μέρος (1-3)", text, &AnalysisOptions::default());

    assert_eq!(analysis.initial_numbers, vec![1, 3]);
    assert_eq!(analysis.title_completions.len(), 1);
    assert!(analysis.gap_completions.is_empty());
    assert_eq!(analysis.confirmed_numbers(), vec![1, 2, 3]);
    assert!(analysis.missing_vs_title().is_empty());
    assert_eq!(analysis.source_of_completion(), CompletionSource::Internal);

    assert!(!analysis.report_before().forms_single_continuous_sequence);
    assert!(analysis.report_after().forms_single_continuous_sequence);

    let chunks = analysis.chunks(text);
    assert_eq!(chunk_numbers(&chunks), vec![1, 2, 3]);
    assert_eq!(
        chunks[1].origin,
        Some(BoundaryOrigin::Promoted(MentionPriority::Inline))
    );
    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn out_of_place_completion_does_not_split_a_later_article() {
    let text = "Άρθρο 1\nα\nΆρθρο 3\nΌπως ορίζει το Άρθρο 2 ανωτέρω\nβ\n";
    let analysis = analyse_document(1, "", text, &AnalysisOptions::default());

    assert_eq!(analysis.gap_completions.len(), 1);
    assert_eq!(analysis.confirmed_numbers(), vec![1, 2, 3]);
    assert!(analysis.report_after().forms_single_continuous_sequence);
    assert!(analysis.positional_promotions().is_empty());

    let chunks = analysis.chunks(text);
    assert_eq!(chunk_numbers(&chunks), vec![1, 3]);
    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn chunk_numbers_increase_through_promoted_boundaries() {
    let text = concat!(
        "Εισαγωγή\nΆρθρο 1\nα\nβλ. Άρθρο 2\nβ\n",
        "Άρθρο 5\nγ\nκατά το Άρθρο 3\nΆρθρο 4 παρ. 1\n",
        "Άρθρο 6\nδ\n",
    );
    let analysis = analyse_document(1, "", text, &AnalysisOptions::default());

    assert_eq!(analysis.confirmed_numbers(), vec![1, 2, 3, 4, 5, 6]);
    let numbers = chunk_numbers(&analysis.chunks(text));
    assert_eq!(numbers, vec![1, 2, 5, 6]);
    assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn merged_header_number_does_not_expand_its_gap() {
    let text = "Άρθρο 1\nα\nΆρθρο 300000000\nβ\nβλ. Άρθρο 2\n";
    let analysis = analyse_document(1, "", text, &AnalysisOptions::default());

    assert_eq!(analysis.initial_numbers, vec![1, 300_000_000]);
    assert_eq!(analysis.confirmed_numbers(), vec![1, 2, 300_000_000]);

    let report = analysis.report_after();
    assert!(!report.forms_single_continuous_sequence);
    assert!(report.missing_numbers.is_empty());
    assert_eq!(report.unlisted_gaps, vec![3..=299_999_999]);
    assert_eq!(report.missing_count(), 299_999_997);

    assert_eq!(chunk_numbers(&analysis.chunks(text)), vec![1, 300_000_000]);
}

#[test]
fn implausible_spans_are_flagged_not_listed() {
    let text = "Άρθρο 1\nα\nΆρθρα 2 – 300000000\nΚαταργούνται.\n";
    let analysis = analyse_document(1, "", text, &AnalysisOptions::default());
    assert!(analysis.range_declared.is_empty());
    assert_eq!(analysis.confirmed_numbers(), vec![1]);

    let outcome = resolve_bridge(
        &[1],
        &find_all_article_mentions("Άρθρο 1\nβλ. Άρθρο 2\n"),
        &[400_000_000],
        &find_all_article_mentions("Άρθρο 400000000\n"),
    );
    assert_eq!(outcome.gap, Some(2..=399_999_999));
    assert_eq!(outcome.left[0].article_number, 2);
    assert!(outcome.unresolved.is_empty());
    assert_eq!(outcome.unresolved_unlisted, vec![2..=399_999_999]);
}

#[test]
fn range_declarations_close_gaps_without_chunking() {
    let text = "Άρθρο 244\nα\nΆρθρα 245 – 250\nΚαταργούνται.\nΆρθρο 251\nβ\n";
    let analysis = analyse_document(1, "", text, &AnalysisOptions::default());

    assert_eq!(analysis.initial_numbers, vec![244, 251]);
    assert_eq!(analysis.range_declared, (245..=250).collect::<Vec<u32>>());
    assert!(analysis.gap_completions.is_empty());
    assert!(!analysis.report_before().forms_single_continuous_sequence);
    assert!(analysis.report_after().forms_single_continuous_sequence);
    assert_eq!(analysis.chunks(text).len(), 2);
}

#[test]
fn word_grammar_runs_the_same_pipeline() {
    let text = "Άρθρο πρώτο\nα\nΆρθρο τρίτο\nβ, όπως το Άρθρο δεύτερο\n";
    let options = AnalysisOptions {
        grammar: GrammarKind::Words,
        ..AnalysisOptions::default()
    };
    let analysis = analyse_document(1, "", text, &options);
    assert_eq!(analysis.initial_numbers, vec![1, 3]);
    assert_eq!(analysis.confirmed_numbers(), vec![1, 2, 3]);
}

#[test]
fn bridge_attributes_shared_numbers_to_the_left_record() {
    let left_text = "Άρθρο 1\nα\nΆρθρο 2\nβ\nΆρθρο 3 παρ. 2 τροποποιείται\n";
    let right_text = "Άρθρο 3 παρ. 2 ως εξής\nΆρθρο 4\nγ\nΆρθρο 5\nδ\n";

    let outcome = resolve_bridge(
        &[1, 2],
        &find_all_article_mentions(left_text),
        &[4, 5],
        &find_all_article_mentions(right_text),
    );
    assert_eq!(outcome.gap, Some(3..=3));
    assert_eq!(outcome.left.len(), 1);
    assert_eq!(outcome.left[0].article_number, 3);
    assert!(outcome.right.is_empty());
    assert!(outcome.unresolved.is_empty());
}

#[test]
fn bridge_splits_a_gap_between_both_records() {
    let outcome = resolve_bridge(
        &[1],
        &find_all_article_mentions("Άρθρο 1\nβλ. Άρθρο 2\n"),
        &[5],
        &find_all_article_mentions("κατά το Άρθρο 3\nΆρθρο 5\n"),
    );
    assert_eq!(outcome.gap, Some(2..=4));
    assert_eq!(outcome.left[0].article_number, 2);
    assert_eq!(outcome.right[0].article_number, 3);
    assert_eq!(outcome.unresolved, vec![4]);
    assert!(outcome.unresolved_unlisted.is_empty());

    assert_eq!(bridge_gap(&[], &[3]), None);
    assert_eq!(bridge_gap(&[4], &[5]), None);
    assert_eq!(bridge_gap(&[6], &[5]), None);
}

#[test]
fn consultation_bridges_only_consecutive_ids() {
    let left = "Άρθρο 1\nα\nΆρθρο 2\nβλ. Άρθρο 3\n";
    let right = "Άρθρο 4\nγ\n";

    let adjacent = [record(10, "", left), record(11, "", right)];
    let analysis = analyse_consultation(1, &adjacent, &AnalysisOptions::default());
    assert_eq!(analysis.bridges.len(), 1);
    assert_eq!(analysis.records[0].confirmed_numbers(), vec![1, 2, 3]);
    assert_eq!(analysis.records[0].source_of_completion(), CompletionSource::Bridge);
    assert!(analysis.after.forms_single_continuous_sequence);
    assert_eq!(analysis.mechanism_counts().bridge_completions, 1);

    let bridged = analysis.ledger.get(10, 3).expect("bridged number is recorded");
    assert_eq!(bridged.source, NumberSource::Bridge);

    let distant = [record(10, "", left), record(12, "", right)];
    let analysis = analyse_consultation(1, &distant, &AnalysisOptions::default());
    assert!(analysis.bridges.is_empty());
    assert_eq!(analysis.after.missing_numbers, vec![3]);
}

#[test]
fn bridged_numbers_never_become_chunks() {
    let left = "Άρθρο 1\nα\nΆρθρο 2\nβλ. Άρθρο 3\n";
    let records = [record(10, "", left), record(11, "", "Άρθρο 4\nγ\n")];
    let mut analysis = analyse_consultation(1, &records, &AnalysisOptions::default());

    let emitted = emit_articles(&records, &mut analysis, false);
    assert_eq!(chunk_numbers(&emitted[0].chunks), vec![1, 2]);
    assert_eq!(emitted[0].final_sequence_numbers, vec![1, 2, 3]);
}

#[test]
fn three_record_consultation_becomes_continuous() {
    let records = [
        record(1, "", "Άρθρο 1\nα\nΆρθρο 2\nβ\nΆρθρο 3\nγ\n"),
        record(
            2,
            "",
            "Άρθρο 4\nΤο νέο κείμενο:\n«Άρθρο 5»\nδ\nΆρθρο 6\nε\n",
        ),
        record(3, "", "Άρθρο 7\nζ\nΆρθρο 8\nη\n"),
    ];
    let analysis = analyse_consultation(1, &records, &AnalysisOptions::default());

    assert!(!analysis.before.forms_single_continuous_sequence);
    assert_eq!(analysis.before.missing_numbers, vec![5]);
    assert!(analysis.after.forms_single_continuous_sequence);
    assert!(analysis.after.missing_numbers.is_empty());

    let middle = &analysis.records[1];
    assert_eq!(middle.confirmed_numbers(), vec![4, 5, 6]);
    assert_eq!(
        middle.gap_completions[0].priority,
        MentionPriority::QuotedStartOfLine
    );

    let entry = analysis.ledger.get(2, 5).expect("gap fill is recorded");
    assert_eq!(entry.source, NumberSource::InternalGap);

    let header_entries = analysis
        .ledger
        .entries()
        .filter(|entry| entry.source == NumberSource::Header)
        .count();
    assert_eq!(header_entries, 7);

    let counts = analysis.mechanism_counts();
    assert_eq!(counts.start_of_line_headers, 7);
    assert_eq!(counts.internal_gap_completions, 1);
    assert_eq!(counts.bridge_completions, 0);
    assert!(analysis.bridges.is_empty());
}

#[test]
fn full_reconstruction_is_idempotent() {
    let records = [
        record(1, "Μέρος Α (1-3)", "Προοίμιο\nΆρθρο 1\nα\nόπως το Άρθρο 2\nΆρθρο 3\nβ\n"),
        record(2, "", "Άρθρο 4\n«Άρθρο 5»\nγ\nΆρθρο 6\nβλ. Άρθρο 7\n"),
        record(3, "", "Άρθρο 8\r\nδ\r\n"),
    ];
    let options = AnalysisOptions::default();
    let first = analyse_consultation(1, &records, &options);
    let second = analyse_consultation(1, &records, &options);

    assert_eq!(first.before, second.before);
    assert_eq!(first.after, second.after);
    assert!(first.after.forms_single_continuous_sequence);

    for ((once, twice), record) in first.records.iter().zip(&second.records).zip(&records) {
        assert_eq!(once.headers, twice.headers);
        assert_eq!(once.report_before(), twice.report_before());
        assert_eq!(once.report_after(), twice.report_after());

        let chunks = once.chunks(&record.content);
        assert_eq!(chunks, twice.chunks(&record.content));

        let rebuilt = reassemble(&chunks);
        assert_eq!(rebuilt, record.content);
        let reread = analyse_document(record.id, &record.title, &rebuilt, &options);
        assert_eq!(reread.headers, once.headers);
        assert_eq!(reread.chunks(&rebuilt), chunks);
    }
}

#[test]
fn emission_skips_numbers_owned_by_earlier_records() {
    let records = [
        record(1, "", "Άρθρο 1\nα\n"),
        record(2, "", "Άρθρο 1\nεπανάληψη\nΆρθρο 2\nβ\n"),
    ];
    let mut analysis = analyse_consultation(1, &records, &AnalysisOptions::default());
    let emitted = emit_articles(&records, &mut analysis, false);

    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].chunks.len(), 1);
    assert_eq!(emitted[1].chunks.len(), 1);
    assert_eq!(emitted[1].chunks[0].article_number, Some(2));
    assert_eq!(emitted[1].duplicates, vec![1]);
}

#[test]
fn singletons_pass_through_only_on_request() {
    let records = [record(1, "", "Χωρίς αρίθμηση\n")];

    let mut analysis = analyse_consultation(1, &records, &AnalysisOptions::default());
    assert!(emit_articles(&records, &mut analysis, false).is_empty());

    let emitted = emit_articles(&records, &mut analysis, true);
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].chunks[0].body, "Χωρίς αρίθμηση\n");
    assert_eq!(emitted[0].source_of_completion, CompletionSource::None);
}

#[test]
fn ledger_claims_are_first_come() {
    let mut ledger = ConsultationLedger::default();
    assert_eq!(ledger.claim(1, 4), Claim::Fresh);
    assert_eq!(ledger.claim(1, 4), Claim::Fresh);
    assert_eq!(ledger.claim(2, 4), Claim::DuplicateOf(1));
    assert!(ledger.is_empty());
}
