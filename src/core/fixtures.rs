//! Shared source fixtures for unit tests.

pub const SAMPLE_JS: &str = r##"// REQUIRE: foo

function main() { /*  ** * * * * *a block comment    */ return 1 } /*  block */ const a = 1 // yeah

/**
 * REQUIRE: hell yeah
 * yes yes
 * foo
 * bar
 *
 * Hail
 */

const x = 42 /* SATISFIED: foo */ // SATISFIED: hell yeah yes yes foo bar
x() // REQUIRE(extern): qwerty
"##;

pub const SAMPLE_PY: &str = r##"# Fooooooo
# Barrrrrrr
'''Hell yeah
'''
def main():
    """
    REQUIRE: foo
    bar

    Nope
    """
    pass  # SATISFIED: foo bar

    x = """REQUIRE: yes yes"""
    y = """SATISFIED: yes yes"""

    z()  # SATISFIED(extern): qwerty
"##;
