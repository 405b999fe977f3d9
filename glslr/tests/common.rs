use glslr::ast::print;
use glslr::parse::{ParseShape, Parser};
use glslr::transform::TransformationManager;

use pretty_assertions::assert_eq;

pub fn init_logger() {
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init()
        .ok();
}

/// Parse and reprint a source, yielding the engine's normalized form
pub fn normalize(source: &str) -> String {
    let (root, unit) = Parser::new()
        .parse_node_separate(
            glslr::ast::RootSupplier::Default,
            ParseShape::TranslationUnit,
            source,
        )
        .expect("failed to parse");
    print::print_tree(&root, unit)
}

/// Run the manager over `source` and compare against the normalized expectation
pub fn verify_transform<J: Default>(
    manager: &mut TransformationManager<J>,
    source: &str,
    expected: &str,
) {
    init_logger();

    let transformed = manager.transform(source).expect("transform failed");
    let expected = normalize(expected);

    eprintln!(
        ">>> source:\n{}\n>>> transformed:\n{}\n>>> expected:\n{}",
        source, transformed, expected
    );
    assert_eq!(transformed, expected);
}
