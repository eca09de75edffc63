use super::*;

#[test]
fn identity_is_always_registered_and_unmangled() {
    let cache = AnalyzerCache::new();
    let identity = cache.get(IDENTITY).expect("identity analyzer");

    assert_eq!(identity.name(), IDENTITY);
    assert!(!identity.requires_mangling());
    assert_eq!(identity.tokens("a b"), vec!["a b".to_string()]);
}

#[test]
fn unknown_analyzer_is_reported_by_name() {
    let cache = AnalyzerCache::new();
    let err = cache.get("text_en").unwrap_err();

    assert_eq!(err, CompileError::AnalyzerNotFound { name: "text_en".into() });
}

#[test]
fn registered_analyzers_tokenize_and_mangle() {
    let cache = AnalyzerCache::new();
    cache.register(Arc::new(DelimiterAnalyzer::new("csv", ",")));
    cache.register(Arc::new(NormAnalyzer::new("norm")));

    let csv = cache.get("csv").expect("registered");
    assert!(csv.requires_mangling());
    assert_eq!(csv.tokens("a,,b"), vec!["a".to_string(), "b".to_string()]);

    let norm = cache.get("norm").expect("registered");
    assert_eq!(norm.tokens("AbC"), vec!["abc".to_string()]);
}
