//! 语义检查模块。
//!
//! 检查器只做验证，不重写语法树。它维护一个词法嵌套的作用域栈、
//! 一张结构体声明表，以及结构体深度优先遍历的访问状态。
//! 第一个诊断立即终止整个检查。

mod expression;
mod function;
mod scope;
mod statement;
mod structs;
pub mod types;
#[cfg(test)]
mod test;

use crate::parser::ast::{FnType, Module, StructDecl, Type};
use crate::reporter::{CompilerError, SemanticError};
use scope::{GenericType, ScopeStack, ScopeVar};
use std::collections::HashMap;

/// 结构体深度优先遍历的着色。
/// 不在映射中 = 未访问，`Started` = 访问中，`Done` = 已完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Started,
    Done,
}

/// 语义检查器。生命周期参数绑定到被检查的模块。
pub struct Checker<'m> {
    scope: ScopeStack,
    structs: HashMap<String, &'m StructDecl>,
    visit: HashMap<String, Visit>,
}

/// 对整个模块进行语义检查。
///
/// 全局作用域的构造顺序是固定的：先安装内置类型，再安装所有结构体名，
/// 再检查结构体体；然后安装所有函数签名，最后检查函数体。
/// 每一类的两趟拆分允许前向引用。
pub fn check_module(module: &Module) -> Result<(), CompilerError> {
    let mut checker = Checker {
        scope: ScopeStack::new(),
        structs: HashMap::new(),
        visit: HashMap::new(),
    };

    // 内置类型
    checker.scope.add_type("u8", GenericType { params: Vec::new() });
    checker.scope.add_type("i32", GenericType { params: Vec::new() });
    checker.scope.add_type("bool", GenericType { params: Vec::new() });
    checker.scope.add_type(
        "slice",
        GenericType {
            params: vec!["eltype".to_string()],
        },
    );

    // 结构体名先进作用域，此时不访问结构体体
    for decl in &module.structs {
        if checker.scope.find_type(&decl.name.name).is_some() {
            return Err(SemanticError::DuplicateType {
                name: decl.name.name.clone(),
                pos: decl.name.pos,
            }
            .into());
        }
        let params = decl.params.iter().map(|param| param.name.clone()).collect();
        checker.scope.add_type(&decl.name.name, GenericType { params });
        checker.structs.insert(decl.name.name.clone(), decl);
    }

    // 检查结构体体
    for decl in &module.structs {
        checker.check_struct(decl)?;
    }

    // 函数名作为函数类型的值进作用域，此时不访问函数体
    for decl in &module.fns {
        if checker.scope.find_var(&decl.name.name).is_some() {
            return Err(SemanticError::DuplicateIdent {
                name: decl.name.name.clone(),
                pos: decl.name.pos,
            }
            .into());
        }
        let params = decl.params.iter().map(|param| param.ty.clone()).collect();
        checker.scope.add_var(
            &decl.name.name,
            ScopeVar {
                ty: Type::Fn(FnType {
                    params,
                    ret: decl.ret.clone(),
                }),
                mutable: false,
            },
        );
    }

    // 检查函数体
    for decl in &module.fns {
        checker.check_fn(decl)?;
    }

    Ok(())
}
