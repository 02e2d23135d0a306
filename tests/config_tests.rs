// path: tests/config_tests.rs
use std::path::PathBuf;

use anchorgram::config::PipelineConfig;

#[test]
fn from_env_reads_all() {
    std::env::set_var("AG_STOPWORDS", "/tmp/stopx.txt");
    std::env::set_var("AG_BINDEX", "/tmp/bindexx.txt");
    std::env::set_var("AG_RUN_TAG", "BIGRAMS");
    std::env::set_var("AG_TOP_K", "25");

    let cfg = PipelineConfig::from_env();

    assert_eq!(cfg.stopwords_path, PathBuf::from("/tmp/stopx.txt"));
    assert_eq!(cfg.bindex_path, PathBuf::from("/tmp/bindexx.txt"));
    assert_eq!(cfg.run_tag, "BIGRAMS");
    assert_eq!(cfg.top_k, 25);

    // unparsable number falls back to the default
    std::env::set_var("AG_TOP_K", "lots");
    assert_eq!(PipelineConfig::from_env().top_k, 100);

    std::env::remove_var("AG_STOPWORDS");
    std::env::remove_var("AG_BINDEX");
    std::env::remove_var("AG_RUN_TAG");
    std::env::remove_var("AG_TOP_K");
}
