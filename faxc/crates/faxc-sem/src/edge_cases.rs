//! Edge case tests for faxc-sem — scope-stack corners and binder corners
//! that the ordinary tests in each module don't exercise.

#[cfg(test)]
mod tests {
    use crate::binder::bind;
    use crate::scope::{ScopeStack, SymbolDescriptor, SymbolKind};
    use crate::types::Type;
    use faxc_util::diagnostic::Handler;
    use faxc_util::Symbol;

    fn bind_source(src: &str) -> Handler {
        let mut parser_handler = Handler::new();
        let program = faxc_par::parse(src, &mut parser_handler);
        let handler = Handler::new();
        let _ = bind(program, &handler);
        handler
    }

    fn var(ty: Type, mutable: bool) -> SymbolDescriptor {
        SymbolDescriptor { kind: SymbolKind::Variable, ty, mutable, block_index: 0 }
    }

    // ==================== SCOPE STACK ====================

    #[test]
    fn empty_stack_resolves_nothing() {
        let stack = ScopeStack::new();
        assert!(stack.lookup(Symbol::intern("x")).is_none());
    }

    #[test]
    fn redeclaration_within_one_frame_is_rejected() {
        let mut stack = ScopeStack::new();
        assert!(stack.declare(Symbol::intern("x"), var(Type::i32_ty(), false)).is_ok());
        assert!(stack.declare(Symbol::intern("x"), var(Type::bool_ty(), false)).is_err());
    }

    #[test]
    fn shadowing_across_frames_is_allowed() {
        let mut stack = ScopeStack::new();
        stack.declare(Symbol::intern("x"), var(Type::i32_ty(), false)).unwrap();
        stack.push_frame();
        stack.declare(Symbol::intern("x"), var(Type::bool_ty(), false)).unwrap();
        assert!(stack.lookup(Symbol::intern("x")).unwrap().ty.equals(&Type::bool_ty()));
        stack.pop_frame();
        assert!(stack.lookup(Symbol::intern("x")).unwrap().ty.equals(&Type::i32_ty()));
    }

    #[test]
    fn values_and_labels_are_disjoint_namespaces() {
        let mut stack = ScopeStack::new();
        let name = Symbol::intern("loop_name");
        stack.declare(name, var(Type::i32_ty(), false)).unwrap();
        // A label with the same spelling does not collide with the value.
        assert!(stack.declare_label(name, 0).is_ok());
        assert!(stack.lookup(name).is_some());
        assert!(stack.lookup_label(name).is_some());
    }

    #[test]
    fn block_index_is_monotonic_and_never_reused() {
        let mut stack = ScopeStack::new();
        let a = stack.next_block_index();
        let b = stack.next_block_index();
        assert!(b > a);
    }

    #[test]
    fn popping_frame_clears_its_labels() {
        let mut stack = ScopeStack::new();
        stack.push_frame();
        stack.declare_label(Symbol::intern("outer"), 0).unwrap();
        stack.pop_frame();
        assert!(stack.lookup_label(Symbol::intern("outer")).is_none());
    }

    // ==================== BINDER EDGE CASES ====================

    #[test]
    fn mutual_recursion_between_functions_binds_cleanly() {
        let handler = bind_source(
            "fn is_even(n: i32): bool { if n == 0 { true } else { is_odd(n - 1) } }\n\
             fn is_odd(n: i32): bool { if n == 0 { false } else { is_even(n - 1) } }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn structure_referencing_a_later_structure_binds() {
        let handler = bind_source(
            "struct Node { value: i32, next: Link }\nstruct Link { present: bool }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn break_outside_loop_is_reported() {
        let handler = bind_source("fn main() { break; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn labeled_break_to_unknown_label_is_reported() {
        let handler = bind_source("fn main() { while true { break missing; } }");
        assert!(handler.has_errors());
    }

    #[test]
    fn labeled_break_targets_the_named_loop() {
        let handler = bind_source(
            "fn main() { label outer: while true { while true { break outer; } } }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn enum_access_without_payload_binds_to_the_enum_type() {
        let handler = bind_source("enum Color { Red, Green, Blue }\nlet c: Color = Color.Red;");
        assert!(!handler.has_errors());
    }

    #[test]
    fn non_exhaustive_match_on_enum_is_a_warning_not_an_error() {
        let handler = bind_source(
            "enum Color { Red, Green, Blue }\n\
             fn describe(c: Color): bool { match c { Color.Red => true } }",
        );
        assert!(!handler.has_errors());
        assert!(handler.warning_count() > 0);
    }

    #[test]
    fn match_pattern_type_incompatible_with_scrutinee_is_reported() {
        let handler = bind_source("fn main() { let x: i32 = 1; match x { \"hello\" => 1, _ => 0 }; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn exhaustive_match_whose_every_arm_returns_satisfies_missing_return() {
        let handler = bind_source(
            "enum Color { Red, Green, Blue } \
             fn describe(c: Color): i32 { match c { \
             Color.Red => { return 1; }, Color.Green => { return 2; }, Color.Blue => { return 3; } }; }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn non_exhaustive_match_with_returning_arms_still_reports_missing_return() {
        let handler = bind_source(
            "enum Color { Red, Green, Blue } \
             fn describe(c: Color): i32 { match c { Color.Red => { return 1; } }; }",
        );
        assert!(handler.has_errors());
    }

    #[test]
    fn narrowing_conversion_without_as_is_rejected() {
        let handler = bind_source("let small: u8 = 1; let big: i64 = 2; small = big;");
        assert!(handler.has_errors());
    }

    #[test]
    fn explicit_conversion_allows_narrowing() {
        let handler = bind_source("let big: i64 = 1000; let small: u8 = big as u8;");
        assert!(!handler.has_errors());
    }

    #[test]
    fn named_arguments_may_be_given_out_of_order() {
        let handler = bind_source(
            "fn greet(name: string, times: i32): void {}\n\
             fn main() { greet(times: 2, name: \"hi\"); }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn deeply_nested_blocks_do_not_confuse_shadowing() {
        let mut src = String::from("fn main() { let x: i32 = 0;");
        for _ in 0..32 {
            src.push_str(" { let x: i32 = x + 1;");
        }
        for _ in 0..32 {
            src.push('}');
        }
        src.push('}');
        let handler = bind_source(&src);
        assert!(!handler.has_errors());
    }

    #[test]
    fn zero_length_array_initializer_adopts_the_declared_element_type() {
        // no elements -> nothing to unify the element type from on its own
        let handler = bind_source("let xs: [i32; 0] = [];");
        assert!(!handler.has_errors());
    }
}
