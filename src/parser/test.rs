use super::ast::*;
use super::parse;
use crate::reporter::CompilerError;

/// 辅助函数：解析应该成功的源代码，失败时让测试直接失败。
fn parse_ok(source: &str) -> Module {
    match parse(source) {
        Ok(module) => module,
        Err(error) => panic!("parsing failed unexpectedly: {}", error),
    }
}

/// 辅助函数：解析应该失败的源代码，返回产生的错误。
fn parse_err(source: &str) -> CompilerError {
    match parse(source) {
        Ok(_) => panic!("parsing succeeded unexpectedly for:\n{}", source),
        Err(error) => error,
    }
}

// --- 声明 ---

#[test]
fn test_minimal_function() {
    let module = parse_ok("fn main() { }");
    assert_eq!(module.fns.len(), 1);
    let main = &module.fns[0];
    assert_eq!(main.name.name, "main");
    assert!(main.params.is_empty());
    assert!(main.ret.is_none());
    assert_eq!(main.body.as_ref().map(|body| body.len()), Some(0));
}

#[test]
fn test_function_with_params_and_return_type() {
    let module = parse_ok("fn add(a: i32, b: i32) i32 { return a; }");
    let add = &module.fns[0];
    assert_eq!(add.params.len(), 2);
    assert_eq!(add.params[0].name.name, "a");
    assert_eq!(add.params[1].ty.name.name, "i32");
    assert_eq!(add.ret.as_ref().map(|ret| ret.name.name.as_str()), Some("i32"));
}

#[test]
fn test_extern_function_without_return_type() {
    let module = parse_ok("extern fn print(s: slice[u8]);");
    let print = &module.fns[0];
    assert!(print.body.is_none());
    assert!(print.ret.is_none());
    let param = &print.params[0];
    assert_eq!(param.ty.name.name, "slice");
    assert_eq!(param.ty.args[0].name.name, "u8");
}

#[test]
fn test_extern_function_with_return_type() {
    let module = parse_ok("extern fn read() i32;");
    let read = &module.fns[0];
    assert!(read.body.is_none());
    assert_eq!(read.ret.as_ref().map(|ret| ret.name.name.as_str()), Some("i32"));
}

#[test]
fn test_struct_declaration() {
    let module = parse_ok("struct Pair[A, B] { first: A, second: B }");
    assert_eq!(module.structs.len(), 1);
    let pair = &module.structs[0];
    assert_eq!(pair.name.name, "Pair");
    let params: Vec<&str> = pair.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["A", "B"]);
    assert_eq!(pair.fields.len(), 2);
    assert_eq!(pair.fields[1].name.name, "second");
}

#[test]
fn test_nested_generic_type() {
    let module = parse_ok("fn f(x: table[slice[u8], i32]) { }");
    let ty = &module.fns[0].params[0].ty;
    assert_eq!(ty.name.name, "table");
    assert_eq!(ty.args.len(), 2);
    assert_eq!(ty.args[0].name.name, "slice");
    assert_eq!(ty.args[0].args[0].name.name, "u8");
    assert_eq!(ty.to_string(), "table[slice[u8], i32]");
}

// --- 语句 ---

#[test]
fn test_var_statement() {
    let module = parse_ok("fn f() { var x: i32 = 1; var y: i32; }");
    let body = module.fns[0].body.as_ref().unwrap();
    match &body[0] {
        Stmt::Var { name, ty, init, .. } => {
            assert_eq!(name.name, "x");
            assert_eq!(ty.name.name, "i32");
            assert!(init.is_some());
        }
        other => panic!("expected a var statement, got: {:?}", other),
    }
    match &body[1] {
        Stmt::Var { init, .. } => assert!(init.is_none()),
        other => panic!("expected a var statement, got: {:?}", other),
    }
}

#[test]
fn test_assignment_and_expression_statement() {
    let module = parse_ok("fn f() { x = g(); g(); }");
    let body = module.fns[0].body.as_ref().unwrap();
    assert!(matches!(&body[0], Stmt::Assign { .. }));
    assert!(matches!(&body[1], Stmt::Expr(Expr::Call { .. })));
}

#[test]
fn test_return_statement() {
    let module = parse_ok("fn f() { return; return 42; }");
    let body = module.fns[0].body.as_ref().unwrap();
    assert!(matches!(&body[0], Stmt::Return { expr: None, .. }));
    match &body[1] {
        Stmt::Return {
            expr: Some(Expr::Int { val, .. }),
            ..
        } => assert_eq!(val, "42"),
        other => panic!("expected a return statement, got: {:?}", other),
    }
}

#[test]
fn test_else_if_chain() {
    // else 分支总是一条语句：要么是下一个 if，要么是包装成块的 else 体
    let module = parse_ok("fn f(x: bool) { if (x) { } else if (x) { } else { } }");
    let body = module.fns[0].body.as_ref().unwrap();
    let els = match &body[0] {
        Stmt::If { els: Some(els), .. } => els,
        other => panic!("expected an if statement, got: {:?}", other),
    };
    match els.as_ref() {
        Stmt::If { els: Some(inner), .. } => {
            assert!(matches!(inner.as_ref(), Stmt::Block { .. }));
        }
        other => panic!("expected an else-if, got: {:?}", other),
    }
}

#[test]
fn test_while_statement() {
    let module = parse_ok("fn f(x: bool) { while (x) { g(); } }");
    let body = module.fns[0].body.as_ref().unwrap();
    match &body[0] {
        Stmt::While { cond, body, .. } => {
            assert!(matches!(cond, Expr::Var { .. }));
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected a while statement, got: {:?}", other),
    }
}

// --- 表达式 ---

#[test]
fn test_call_and_field_chain() {
    let module = parse_ok("fn f() { a.b.c(1, \"s\")(); }");
    let body = module.fns[0].body.as_ref().unwrap();
    let expr = match &body[0] {
        Stmt::Expr(expr) => expr,
        other => panic!("expected an expression statement, got: {:?}", other),
    };
    // 整个表达式是一次无参调用，被调用者又是一次双参调用
    let inner = match expr {
        Expr::Call { callee, args } if args.is_empty() => callee,
        other => panic!("expected an outer call, got: {:?}", other),
    };
    match inner.as_ref() {
        Expr::Call { callee, args } => {
            assert_eq!(args.len(), 2);
            match callee.as_ref() {
                Expr::Field { base, field } => {
                    assert_eq!(field.name, "c");
                    assert!(matches!(base.as_ref(), Expr::Field { .. }));
                }
                other => panic!("expected a field access, got: {:?}", other),
            }
        }
        other => panic!("expected an inner call, got: {:?}", other),
    }
}

// --- 失败案例 ---

#[test]
fn test_error_top_level_garbage() {
    // 标识符在错误消息里带引号显示
    let error = parse_err("foo");
    assert_eq!(error.to_string(), "expected declaration but got 'foo'");
}

#[test]
fn test_error_unexpected_token_name() {
    let error = parse_err("fn main(;");
    assert_eq!(error.to_string(), "expected identifier but got ';'");
}

#[test]
fn test_error_missing_semicolon() {
    let error = parse_err("fn f() { g() }");
    assert_eq!(error.to_string(), "expected ';' or '=' but got '}'");
}

#[test]
fn test_error_eof() {
    let error = parse_err("struct");
    assert_eq!(error.to_string(), "expected identifier but got end of file");
}

#[test]
fn test_error_extern_with_body() {
    // extern 声明不允许函数体
    let error = parse_err("extern fn f() i32 { return 1; }");
    assert_eq!(error.to_string(), "expected ';' but got '{'");
}
