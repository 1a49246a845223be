use super::check_module;
use crate::parser;
use crate::reporter::{CompilerError, SemanticError};
use crate::utils::Pos;

/// 辅助函数：用于测试应该通过检查的代码。检查失败会让测试失败。
fn check_ok(source: &str) {
    let module = match parser::parse(source) {
        Ok(module) => module,
        Err(error) => panic!("test setup failed (parsing error): {}", error),
    };
    if let Err(error) = check_module(&module) {
        panic!("checking failed unexpectedly: {}", error);
    }
}

/// 辅助函数：用于测试应该产生语义错误的代码，返回产生的错误。
fn check_err(source: &str) -> CompilerError {
    let module = match parser::parse(source) {
        Ok(module) => module,
        Err(error) => panic!("test setup failed (parsing error): {}", error),
    };
    match check_module(&module) {
        Ok(()) => panic!("checking succeeded unexpectedly for:\n{}", source),
        Err(error) => error,
    }
}

// --- 成功案例 ---

#[test]
fn test_minimal_function() {
    check_ok("fn main() { }");
}

#[test]
fn test_forward_references() {
    // 函数可以调用之后声明的函数，结构体可以包含之后声明的结构体
    check_ok("fn main() { helper(); } fn helper() { }");
    check_ok("struct A { b: B } struct B { x: i32 }");
}

#[test]
fn test_generic_struct_usage() {
    check_ok(
        "struct Box[T] { x: T }\n\
         fn f() {\n\
             var b: Box[i32];\n\
             var y: i32 = b.x;\n\
         }",
    );
}

#[test]
fn test_generic_field_resolution() {
    // 嵌套实例化里字段类型按泛型环境替换
    check_ok(
        "struct Pair[A, B] { first: A, second: B }\n\
         fn f(p: Pair[slice[u8], i32]) {\n\
             var s: slice[u8] = p.first;\n\
             var n: i32 = p.second;\n\
         }",
    );
}

#[test]
fn test_string_literal_is_byte_slice() {
    check_ok("fn f() { var s: slice[u8] = \"hello\"; }");
}

#[test]
fn test_booleans() {
    check_ok("fn f() { var b: bool = true; b = false; if (b) { } }");
}

#[test]
fn test_else_if_chain_returns_on_all_paths() {
    check_ok(
        "fn f(x: bool) i32 {\n\
             if (x) { return 1; } else if (x) { return 2; } else { return 3; }\n\
         }",
    );
}

#[test]
fn test_return_after_while() {
    check_ok("fn f() i32 { while (true) { } return 0; }");
}

#[test]
fn test_void_call_as_statement() {
    check_ok("extern fn print(s: slice[u8]); fn main() { print(\"hi\"); }");
}

#[test]
fn test_field_assignment_through_mutable_var() {
    check_ok("struct S { x: i32 } fn f() { var s: S; s.x = 1; }");
}

// --- 结构体错误 ---

#[test]
fn test_error_duplicate_struct() {
    let error = check_err("struct S { x: i32 } struct S { y: i32 }");
    assert!(matches!(
        error,
        CompilerError::Semantic(SemanticError::DuplicateType { ref name, .. }) if name == "S"
    ));
}

#[test]
fn test_error_struct_shadowing_primitive() {
    let error = check_err("struct u8 { x: i32 }");
    assert_eq!(error.to_string(), "duplicate type 'u8'");
}

#[test]
fn test_error_duplicate_generic_param() {
    let error = check_err("struct S[T, T] { x: T }");
    assert!(matches!(
        error,
        CompilerError::Semantic(SemanticError::DuplicateType { ref name, .. }) if name == "T"
    ));
}

#[test]
fn test_error_duplicate_field() {
    let error = check_err("struct S { x: i32, x: i32 }");
    assert_eq!(error.to_string(), "duplicate field name 'x'");
}

#[test]
fn test_error_empty_struct() {
    let error = check_err("struct S { }");
    assert_eq!(error.to_string(), "struct must have at least one field");
}

#[test]
fn test_error_recursive_struct() {
    let error = check_err("struct A { x: A }");
    assert_eq!(error.to_string(), "recursive struct inclusion is not allowed");
}

#[test]
fn test_error_indirectly_recursive_struct() {
    let error = check_err("struct A { b: B } struct B { a: A }");
    assert!(matches!(
        error,
        CompilerError::Semantic(SemanticError::RecursiveStruct { .. })
    ));
}

// --- 类型错误 ---

#[test]
fn test_error_undefined_type() {
    let error = check_err("fn f() { var x: Missing; }");
    assert_eq!(error.to_string(), "undefined type 'Missing'");
}

#[test]
fn test_error_generic_arity() {
    let error = check_err("fn f() { var x: slice; }");
    assert_eq!(error.to_string(), "expected 1 generic arguments, but got 0");
    let error = check_err("struct Box[T] { x: T } fn f() { var x: Box[i32, i32]; }");
    assert_eq!(error.to_string(), "expected 1 generic arguments, but got 2");
}

#[test]
fn test_error_type_mismatch() {
    let error = check_err("fn f() { var x: i32 = \"hi\"; }");
    assert_eq!(error.to_string(), "cannot convert from 'slice[u8]' to 'i32'");
}

#[test]
fn test_error_condition_must_be_bool() {
    let error = check_err("fn f() { if (1) { } }");
    assert_eq!(error.to_string(), "cannot convert from 'i32' to 'bool'");
    let error = check_err("fn f() { while (1) { } }");
    assert_eq!(error.to_string(), "cannot convert from 'i32' to 'bool'");
}

// --- 标识符错误 ---

#[test]
fn test_error_undefined_identifier() {
    let error = check_err("fn f() { var x: i32 = y; }");
    assert_eq!(error.to_string(), "undefined identifier 'y'");
}

#[test]
fn test_error_duplicate_function() {
    let error = check_err("fn f() { } fn f() { }");
    assert_eq!(error.to_string(), "duplicate identifier 'f'");
}

#[test]
fn test_error_duplicate_var() {
    let error = check_err("fn f() { var x: i32; var x: i32; }");
    assert_eq!(error.to_string(), "duplicate identifier 'x'");
}

#[test]
fn test_error_var_shadowing_param() {
    let error = check_err("fn f(x: i32) { var x: i32; }");
    assert_eq!(error.to_string(), "duplicate identifier 'x'");
}

#[test]
fn test_error_param_shadowing_global() {
    // 重名检查沿整条作用域链进行，形参不能与全局函数同名
    let error = check_err("fn helper() { } fn f(helper: i32) { }");
    assert_eq!(error.to_string(), "duplicate identifier 'helper'");
}

#[test]
fn test_error_booleans_cannot_be_bound() {
    let error = check_err("fn f() { var true: bool; }");
    assert_eq!(error.to_string(), "duplicate identifier 'true'");
    let error = check_err("fn f(false: bool) { }");
    assert_eq!(error.to_string(), "duplicate identifier 'false'");
}

// --- 调用与字段错误 ---

#[test]
fn test_error_argument_count() {
    let error = check_err("fn g(x: i32) { } fn f() { g(1, 2); }");
    assert_eq!(error.to_string(), "expected 1 arguments, but got 2");
}

#[test]
fn test_error_call_non_function() {
    let error = check_err("fn f(x: i32) { x(); }");
    assert_eq!(error.to_string(), "cannot call value of type 'i32'");
}

#[test]
fn test_error_call_void_result() {
    let error = check_err("extern fn p(); fn f() { p()(); }");
    assert_eq!(
        error.to_string(),
        "cannot call expression that does not have a value"
    );
}

#[test]
fn test_error_void_result_has_no_value() {
    let error = check_err("extern fn p(); fn f() { var x: i32 = p(); }");
    assert_eq!(error.to_string(), "expression does not have a value");
}

#[test]
fn test_error_missing_field() {
    let error = check_err("struct S { x: i32 } fn f(s: S) { var y: i32 = s.y; }");
    assert_eq!(error.to_string(), "value does not have field 'y'");
}

#[test]
fn test_error_field_on_non_struct() {
    let error = check_err("fn f(x: i32) { var y: i32 = x.field; }");
    assert_eq!(error.to_string(), "value does not have field 'field'");
}

// --- 语句错误 ---

#[test]
fn test_error_expression_as_statement() {
    let error = check_err("fn f(x: i32) { x; }");
    assert_eq!(error.to_string(), "expression cannot be used as statement");
}

#[test]
fn test_error_assignment_to_parameter() {
    let error = check_err("fn f(x: i32) { x = 2; }");
    match error {
        CompilerError::Semantic(SemanticError::AssignToConst { pos }) => {
            assert_eq!(pos, Pos::new(1, 16));
        }
        other => panic!("expected an assignment error, got: {:?}", other),
    }
    assert_eq!(
        check_err("fn f(x: i32) { x = 2; }").to_string(),
        "cannot assign to constant value"
    );
}

#[test]
fn test_error_assignment_to_field_of_parameter() {
    // 可变性沿字段访问传播，形参的字段同样不可赋值
    let error = check_err("struct S { x: i32 } fn f(s: S) { s.x = 1; }");
    assert_eq!(error.to_string(), "cannot assign to constant value");
}

#[test]
fn test_error_return_value_missing() {
    let error = check_err("fn f() i32 { return; }");
    assert_eq!(error.to_string(), "expected return value of type 'i32'");
}

#[test]
fn test_error_return_value_unexpected() {
    let error = check_err("fn f() { return 1; }");
    assert_eq!(error.to_string(), "function cannot return a value");
}

// --- 返回路径分析 ---

#[test]
fn test_error_not_all_paths_return() {
    let error = check_err("fn f(x: bool) i32 { if (x) { return 1; } }");
    match error {
        CompilerError::Semantic(SemanticError::MissingReturn { pos }) => {
            // 诊断指向返回类型的位置
            assert_eq!(pos, Pos::new(1, 15));
        }
        other => panic!("expected a missing return error, got: {:?}", other),
    }
    assert_eq!(
        check_err("fn f(x: bool) i32 { if (x) { return 1; } }").to_string(),
        "not all paths return a value"
    );
}

#[test]
fn test_error_if_without_else_does_not_cover() {
    let error = check_err(
        "fn f(x: bool) i32 { if (x) { return 1; } else if (x) { return 2; } }",
    );
    assert!(matches!(
        error,
        CompilerError::Semantic(SemanticError::MissingReturn { .. })
    ));
}

#[test]
fn test_error_extern_function_with_return_type() {
    // 缺失的函数体按空语句序列处理，永远覆盖不了声明的返回类型
    let error = check_err("extern fn read() i32;");
    assert_eq!(error.to_string(), "not all paths return a value");
}

#[test]
fn test_error_while_never_counts_as_returning() {
    // 循环体可能一次都不执行
    let error = check_err("fn f() i32 { while (true) { return 1; } }");
    assert!(matches!(
        error,
        CompilerError::Semantic(SemanticError::MissingReturn { .. })
    ));
}
