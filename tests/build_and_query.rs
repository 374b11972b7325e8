// End-to-end: XML sources -> index -> session -> cache round-trip.

use stroke_core::core::session::QueryReport;
use stroke_core::core::types::StrokeCategory;
use stroke_core::persistence::{discard_cache, load_cache, save_cache};
use stroke_core::{kanjidic, kanjivg, LookupEngine, Session};

const KANJIVG_NS: &str = "http://kanjivg.tagaini.net";

// 一 (1), 十 (12), 土 (121), 丁 (15), plus one structurally broken entry
// and one ambiguous-stroke entry 乙 (5, via a two-way code).
fn stroke_source() -> String {
    format!(
        r#"<kanjivg xmlns:kvg="{KANJIVG_NS}">
  <kanji id="one"><g kvg:element="一"><path kvg:type="㇐"/></g></kanji>
  <kanji id="ten"><g kvg:element="十"><path kvg:type="㇐"/><path kvg:type="㇑"/></g></kanji>
  <kanji id="soil">
    <g kvg:element="土">
      <g><path kvg:type="㇐"/><path kvg:type="㇑"/></g>
      <path kvg:type="㇐"/>
    </g>
  </kanji>
  <kanji id="street"><g kvg:element="丁"><path kvg:type="㇐"/><path kvg:type="㇚"/></g></kanji>
  <kanji id="broken"><g kvg:element="壊"><text>not a stroke</text></g></kanji>
  <kanji id="second"><g kvg:element="乙"><path kvg:type="㇟/㇈"/></g></kanji>
</kanjivg>"#
    )
}

fn reading_source() -> &'static str {
    r#"<kanjidic2>
  <character>
    <literal>十</literal>
    <reading_meaning><rmgroup>
      <reading r_type="ja_on">ジュウ</reading>
      <reading r_type="ja_kun">とお</reading>
      <meaning>ten</meaning>
    </rmgroup></reading_meaning>
  </character>
</kanjidic2>"#
}

fn built_engine() -> LookupEngine {
    let records = kanjivg::parse_document(&stroke_source()).expect("source should parse");
    let (mut engine, errors) = LookupEngine::build_index(records);

    assert_eq!(errors.len(), 1, "only the broken entry should fail");
    assert_eq!(errors[0].glyph, '壊');

    let readings = kanjidic::parse_document(reading_source()).expect("readings should parse");
    engine.attach_readings(readings);
    engine
}

#[test]
fn full_build_then_query() {
    let engine = built_engine();
    let mut session = Session::new(&engine, 10);

    session.enter_digit(StrokeCategory::Horizontal);
    match session.report() {
        QueryReport::Matches { prefix, exact, candidates } => {
            assert_eq!(prefix, "1");
            assert_eq!(exact, vec!['一']);
            // Two-stroke glyphs rank before the three-stroke one.
            assert_eq!(candidates, vec!['丁', '十', '土']);
        }
        other => panic!("expected matches, got {other:?}"),
    }

    session.enter_digit(StrokeCategory::Vertical);
    match session.report() {
        QueryReport::Matches { prefix, exact, candidates } => {
            assert_eq!(prefix, "12");
            assert_eq!(exact, vec!['十']);
            assert_eq!(candidates, vec!['土']);
        }
        other => panic!("expected matches, got {other:?}"),
    }

    // Readings rode along for display.
    let meta = engine.metadata('十').expect("indexed glyph has metadata");
    assert_eq!(meta.on_readings, vec!["ジュウ"]);
    assert_eq!(meta.meanings, vec!["ten"]);
    assert_eq!(meta.canonical, "12");
}

#[test]
fn multi_valued_code_in_one_category_inserts_once() {
    let engine = built_engine();
    let trie = engine.trie();

    // ㇟ and ㇈ both classify as turning, so 乙 collapses to one path.
    let node = trie
        .descend(trie.root(), StrokeCategory::Turning)
        .expect("turning branch exists");
    assert_eq!(trie.collect_at(node), &['乙']);
}

#[test]
fn dead_end_then_backtrack_restores_candidates() {
    let engine = built_engine();
    let mut session = Session::new(&engine, 10);

    for digit in "12145".chars() {
        session.enter_digit(StrokeCategory::from_digit(digit).unwrap());
    }
    assert_eq!(session.report(), QueryReport::NoMatch { prefix: "12145".into() });

    session.backtrack();
    session.backtrack();
    session.backtrack();
    match session.report() {
        QueryReport::Matches { prefix, exact, candidates } => {
            assert_eq!(prefix, "12");
            assert_eq!(exact, vec!['十']);
            assert_eq!(candidates, vec!['土']);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn cache_round_trip_preserves_queries() {
    let engine = built_engine();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stroke_trie.json");

    save_cache(engine.trie(), &path).unwrap();
    let restored = LookupEngine::from_trie(load_cache(&path).unwrap());

    assert_eq!(restored.trie(), engine.trie());
    assert_eq!(restored.stroke_count('土'), 3);

    let mut session = Session::new(&restored, 10);
    session.enter_digit(StrokeCategory::Horizontal);
    match session.report() {
        QueryReport::Matches { exact, candidates, .. } => {
            assert_eq!(exact, vec!['一']);
            assert_eq!(candidates, vec!['丁', '十', '土']);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn corrupt_cache_is_discarded_and_rebuilt_from_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stroke_trie.json");
    std::fs::write(&path, "garbage").unwrap();

    // The load fails; policy is discard then rebuild from the source.
    let engine = match load_cache(&path) {
        Ok(trie) => LookupEngine::from_trie(trie),
        Err(_) => {
            discard_cache(&path);
            let records = kanjivg::parse_document(&stroke_source()).unwrap();
            let (engine, _) = LookupEngine::build_index(records);
            save_cache(engine.trie(), &path).unwrap();
            engine
        }
    };

    assert!(!path.exists() || load_cache(&path).is_ok());
    assert_eq!(engine.stroke_count('十'), 2);
}
