//! Printer behavior: normalization, idempotency, directive newlines

mod common;

use pretty_assertions::assert_eq;

// Printing is idempotent across a reparse
fn assert_stable(source: &str) {
    let once = common::normalize(source);
    let twice = common::normalize(&once);
    assert_eq!(once, twice, "printing changed across a reparse of {:?}", source);
}

#[test]
fn print_is_idempotent_across_parse() {
    assert_stable("#version 460 core\nuniform float alpha;\nvoid main() { gl_FragColor = vec4(alpha); }\n");
    assert_stable("out vec3 color0;\nout layout(location = 2) vec4 color2;\n");
    assert_stable("uniform Block { float a; mat3 m; } inst;\n");
    assert_stable(
        "void main() { for (int i = 0; i < 8; ++i) { if (i > 4) break; else continue; } }\n",
    );
    assert_stable("void main() { do { n *= 2; } while (n < 16); }\n");
    assert_stable("void loop() { while (running) step(); }\n");
    assert_stable(
        "void main() { switch (mode) { case 0: a(); break; default: b(); } }\n",
    );
    assert_stable("precision highp float;\nconst float x = 1.5, y = 2.;\n");
    assert_stable("int[] foo, bar;\nint baz[7];\n");
    assert_stable("struct Light { vec3 position; float radius; };\n");
}

#[test]
fn directives_end_with_a_newline() {
    let printed = common::normalize("#version 330\n#extension GL_ARB_gpu_shader5 : enable\n#pragma optimize(off)\nvoid main() {}\n");
    assert!(printed.contains("#version 330\n"), "got {:?}", printed);
    assert!(
        printed.contains("#extension GL_ARB_gpu_shader5 : enable\n"),
        "got {:?}",
        printed
    );
    assert!(printed.contains("#pragma optimize(off)\n"), "got {:?}", printed);
}

#[test]
fn expression_parentheses_follow_precedence() {
    let printed = common::normalize("void main() { x = (a + b) * c - d / (e - f); }\n");
    assert!(
        printed.contains("x = (a + b) * c - d / (e - f);"),
        "got {:?}",
        printed
    );

    let printed = common::normalize("void main() { y = a + b * c; }\n");
    assert!(printed.contains("y = a + b * c;"), "got {:?}", printed);
}

#[test]
fn ternaries_and_sequences_keep_their_shape() {
    let printed = common::normalize("void main() { pick = cond ? low : high; }\n");
    assert!(printed.contains("pick = cond ? low : high;"), "got {:?}", printed);

    let printed = common::normalize("void main() { count(), advance(); }\n");
    assert!(printed.contains("count(), advance();"), "got {:?}", printed);
}

#[test]
fn layout_defaults_print_with_their_qualifier() {
    let printed = common::normalize("layout(early_fragment_tests) in;\nvoid main() {}\n");
    assert!(
        printed.contains("layout(early_fragment_tests) in;\n"),
        "got {:?}",
        printed
    );
}

#[test]
fn interface_blocks_print_members_and_instance() {
    let printed = common::normalize("uniform Matrices { mat4 mvp; } mats;\nvoid main() {}\n");
    assert_eq!(
        printed,
        "uniform Matrices {\n    mat4 mvp;\n} mats;\nvoid main() {\n}\n"
    );
}
