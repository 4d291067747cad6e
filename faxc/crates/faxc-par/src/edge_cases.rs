//! Edge case tests for faxc-par

#[cfg(test)]
mod tests {
    use crate::ast::{Declaration, Program};
    use faxc_util::diagnostic::Handler;

    fn parse_source(source: &str) -> (Program, Handler) {
        let mut handler = Handler::new();
        let program = crate::parse(source, &mut handler);
        (program, handler)
    }

    // ==================== EDGE CASES ====================

    /// EDGE CASE: Empty source
    #[test]
    fn test_edge_empty_source() {
        let (program, handler) = parse_source("");
        assert!(program.declarations.is_empty());
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Whitespace only
    #[test]
    fn test_edge_whitespace_only() {
        let (program, handler) = parse_source("   \n\t  \n  ");
        assert!(program.declarations.is_empty());
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Single function
    #[test]
    fn test_edge_single_function() {
        let (program, handler) = parse_source("fn main() { }");
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Empty function body
    #[test]
    fn test_edge_empty_function_body() {
        let (program, handler) = parse_source("fn empty() {}");
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
        match &program.declarations[0] {
            Declaration::Function(f) => {
                assert!(f.body.statements.is_empty());
                assert!(f.body.tail.is_none());
            }
            other => panic!("expected a function declaration, got {other:?}"),
        }
    }

    /// EDGE CASE: Function with no parameters
    #[test]
    fn test_edge_no_params() {
        let (_, handler) = parse_source("fn no_params() { let x: i32 = 1; }");
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Function with single parameter
    #[test]
    fn test_edge_single_param() {
        let (_, handler) = parse_source("fn one(x: i32) { }");
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Deeply nested blocks
    #[test]
    fn test_edge_nested_blocks() {
        let source = "fn main() { {{{{ let x: i32 = 1; }}}} }";
        let (program, handler) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Multiple statements
    #[test]
    fn test_edge_multiple_stmts() {
        let source = "fn main() { let a: i32 = 1; let b: i32 = 2; let c: i32 = 3; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: If without else
    #[test]
    fn test_edge_if_no_else() {
        let source = "fn main() { if true { let x: i32 = 1; } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: If with else
    #[test]
    fn test_edge_if_else() {
        let source = "fn choose(): i32 { if true { 1 } else { 2 } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Nested if-else
    #[test]
    fn test_edge_nested_if_else() {
        let source = "fn choose(): i32 { if true { if false { 1 } else { 2 } } else { 3 } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: While loop
    #[test]
    fn test_edge_while_loop() {
        let source = "fn main() { while true { let x: i32 = 1; } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Ranged for loop
    #[test]
    fn test_edge_ranged_for_loop() {
        let source = "fn main() { for i in 0..10 { let x: i32 = i; } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: C-style for loop
    #[test]
    fn test_edge_c_style_for_loop() {
        let source = "fn main() { for (let mut i: i32 = 0; i < 10; i = i + 1) { let x: i32 = i; } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Labeled while loop with break
    #[test]
    fn test_edge_labeled_loop_break() {
        let source = "fn main() { label outer: while true { break outer; } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Loop with continue
    #[test]
    fn test_edge_loop_continue() {
        let source = "fn main() { while true { continue; } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Goto a label
    #[test]
    fn test_edge_goto() {
        let source = "fn main() { label start: { let x: i32 = 1; } goto start; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Return statement
    #[test]
    fn test_edge_return() {
        let source = "fn main() { return; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Return with value
    #[test]
    fn test_edge_return_value() {
        let source = "fn answer(): i32 { return 42; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Binary expressions
    #[test]
    fn test_edge_binary_exprs() {
        let source = "fn main() { let x: i32 = 1 + 2 * 3 - 4 / 2; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Comparison operators
    #[test]
    fn test_edge_comparisons() {
        let source = "fn main() { let x: bool = 1 == 2; let y: bool = 1 != 2; let z: bool = 1 < 2; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Logical operators
    #[test]
    fn test_edge_logical_ops() {
        let source = "fn main() { let x: bool = true && false; let y: bool = true || false; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Unary operators
    #[test]
    fn test_edge_unary_ops() {
        let source = "fn main() { let x: i32 = -5; let y: bool = !true; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Struct definition
    #[test]
    fn test_edge_struct_def() {
        let source = "struct Point { x: i32, y: i32 }";
        let (program, handler) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Empty struct
    #[test]
    fn test_edge_empty_struct() {
        let source = "struct Empty {}";
        let (program, _) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
    }

    /// EDGE CASE: Enum definition
    #[test]
    fn test_edge_enum_def() {
        let source = "enum Color { Red, Green, Blue }";
        let (program, handler) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Enum with a payload-carrying variant
    #[test]
    fn test_edge_enum_variants() {
        let source = "enum Maybe { Some(i32), None }";
        let (program, handler) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Match expression
    #[test]
    fn test_edge_match() {
        let source = "fn main() { match 1 { 0 => 1, _ => 2 } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Match clause with multiple patterns
    #[test]
    fn test_edge_match_multiple_patterns() {
        let source = "fn main() { match 1 { 0, 1 => 1, _ => 2 } }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Function call
    #[test]
    fn test_edge_fn_call() {
        let source = "fn foo() { } fn bar(a: i32, b: i32) { } fn main() { foo(); bar(1, 2); }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Nested function calls
    #[test]
    fn test_edge_nested_fn_calls() {
        let source = r#"
            fn baz(n: i32): i32 { return n; }
            fn bar(n: i32): i32 { return baz(n); }
            fn foo(n: i32): i32 { return bar(n); }
            fn main() { foo(1); }
        "#;
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: All literal types
    #[test]
    fn test_edge_all_literals() {
        let source = "fn main() { let a: i32 = 42; let b: f64 = 3.14; let c: string = \"hello\"; let d: bool = true; let e: char = 'x'; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: putc and puts statements
    #[test]
    fn test_edge_putc_puts() {
        let source = "fn main() { putc 'x'; puts \"hello\"; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: External declaration
    #[test]
    fn test_edge_external_decl() {
        let source = "extern fn read_line(): string;";
        let (program, handler) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Alias declaration
    #[test]
    fn test_edge_alias_decl() {
        let source = "alias Id = i32;";
        let (program, handler) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Explicit conversion
    #[test]
    fn test_edge_conversion() {
        let source = "fn main() { let x: i32 = 5; let y: f64 = x as f64; }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    // ==================== ERROR CASES ====================

    /// ERROR CASE: Missing semicolon
    #[test]
    fn test_err_missing_semicolon() {
        let source = "fn main() { let x: i32 = 1 let y: i32 = 2; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Missing closing brace
    #[test]
    fn test_err_missing_closing_brace() {
        let source = "fn main() { let x: i32 = 1;";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Missing opening brace
    #[test]
    fn test_err_missing_opening_brace() {
        let source = "fn main() let x: i32 = 1; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Invalid token in function body
    #[test]
    fn test_err_invalid_token() {
        let source = "fn main() { @#$ }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Incomplete if statement
    #[test]
    fn test_err_incomplete_if() {
        let source = "fn main() { if true }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Incomplete while loop
    #[test]
    fn test_err_incomplete_while() {
        let source = "fn main() { while true }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Incomplete match
    #[test]
    fn test_err_incomplete_match() {
        let source = "fn main() { match x { }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Incomplete struct
    #[test]
    fn test_err_incomplete_struct() {
        let source = "struct Point { x: i32";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Incomplete enum
    #[test]
    fn test_err_incomplete_enum() {
        let source = "enum Color { Red";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Invalid function signature
    #[test]
    fn test_err_invalid_fn_sig() {
        let source = "fn main( { }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Missing function body
    #[test]
    fn test_err_missing_fn_body() {
        let source = "fn main()";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Invalid type annotation
    #[test]
    fn test_err_invalid_type() {
        let source = "fn main() { let x: @invalid = 1; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Unbalanced parentheses
    #[test]
    fn test_err_unbalanced_parens() {
        let source = "fn foo(a: i32, b: i32) { } fn main() { foo((1, 2); }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Unbalanced brackets
    #[test]
    fn test_err_unbalanced_brackets() {
        let source = "fn main() { let x: [i32; 2] = [1, 2; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Unterminated string in code
    #[test]
    fn test_err_unterminated_string_in_code() {
        let source = "fn main() { let x: string = \"unterminated; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Multiple errors
    #[test]
    fn test_err_multiple_errors() {
        let source = "fn main( { if true { let x: i32 = @ }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Empty match arm
    #[test]
    fn test_err_empty_match_arm() {
        let source = "fn main() { match 1 { 0 => } }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Invalid operator
    #[test]
    fn test_err_invalid_operator() {
        let source = "fn main() { let x: i32 = 1 @ 2; }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// ERROR CASE: Missing condition in if
    #[test]
    fn test_err_missing_if_cond() {
        let source = "fn choose(): i32 { if { 1 } }";
        let (_, handler) = parse_source(source);
        assert!(handler.has_errors());
    }

    /// EDGE CASE: Trailing comma in struct
    #[test]
    fn test_edge_trailing_comma_struct() {
        let source = "struct Point { x: i32, y: i32, }";
        let (program, _) = parse_source(source);
        // Should handle trailing comma gracefully
        assert_eq!(program.declarations.len(), 1);
    }

    /// EDGE CASE: Trailing comma in enum
    #[test]
    fn test_edge_trailing_comma_enum() {
        let source = "enum Color { Red, Green, Blue, }";
        let (program, _) = parse_source(source);
        assert_eq!(program.declarations.len(), 1);
    }

    /// EDGE CASE: Comments in code
    #[test]
    fn test_edge_comments() {
        let source = "fn main() { // comment\nlet x: i32 = 1; /* block */ }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }

    /// EDGE CASE: Complex expression
    #[test]
    fn test_edge_complex_expr() {
        let source = "fn main() { let x: i32 = (1 + 2) * (3 - 4) / (5 % 6); }";
        let (_, handler) = parse_source(source);
        assert!(!handler.has_errors());
    }
}
