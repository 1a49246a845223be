// 类型相关的检查逻辑：结构性相等、命名类型的合法性、泛型替换。
// 泛型替换的两个函数同样被代码生成器用来做单态化。

use super::{Checker, SemanticError};
use crate::parser::ast::{NamedType, StructDecl, Type};
use crate::reporter::CompilerError;
use std::collections::HashMap;

/// 结构性类型相等：两边都必须是命名类型，头名相同且实参两两相等。
/// 函数类型不与任何类型相等。
pub fn type_equal(left: &Type, right: &NamedType) -> bool {
    match left {
        Type::Named(left) => named_type_equal(left, right),
        Type::Fn(_) => false,
    }
}

/// 命名类型的结构性相等。
/// 头名相同而实参数量不同在检查过的输入上不可能出现。
pub fn named_type_equal(left: &NamedType, right: &NamedType) -> bool {
    if left.name.name != right.name.name {
        return false;
    }
    if left.args.len() != right.args.len() {
        panic!("different number of generic arguments");
    }
    left.args
        .iter()
        .zip(&right.args)
        .all(|(left, right)| named_type_equal(left, right))
}

/// 把命名类型中的泛型形参替换为环境里给出的具体类型。
pub fn resolve_generic_type(ty: &NamedType, env: &HashMap<String, NamedType>) -> NamedType {
    if let Some(concrete) = env.get(&ty.name.name) {
        // 形参本身不能再带实参
        if !ty.args.is_empty() {
            panic!("cannot instantiate generic parameter");
        }
        concrete.clone()
    } else {
        let args = ty
            .args
            .iter()
            .map(|arg| resolve_generic_type(arg, env))
            .collect();
        NamedType {
            name: ty.name.clone(),
            args,
        }
    }
}

/// 计算某次结构体实例化的泛型环境：形参名到具体类型的映射。
pub fn generic_env(decl: &StructDecl, args: &[NamedType]) -> HashMap<String, NamedType> {
    if decl.params.len() != args.len() {
        panic!("incorrect generic instantiation");
    }
    decl.params
        .iter()
        .zip(args)
        .map(|(param, arg)| (param.name.clone(), arg.clone()))
        .collect()
}

impl<'m> Checker<'m> {
    /// 检查一个命名类型：名字必须已声明，泛型实参数量必须匹配，
    /// 实参递归检查。如果头名是结构体，则触发对它的检查，
    /// 这正是驱动递归包含检测的交叉调用。
    pub(super) fn check_type(&mut self, ty: &NamedType) -> Result<(), CompilerError> {
        let decl = match self.scope.find_type(&ty.name.name) {
            Some(decl) => decl,
            None => {
                return Err(SemanticError::UndefinedType {
                    name: ty.name.name.clone(),
                    pos: ty.at(),
                }
                .into());
            }
        };
        if ty.args.len() != decl.params.len() {
            return Err(SemanticError::GenericArity {
                expected: decl.params.len(),
                found: ty.args.len(),
                pos: ty.name.pos,
            }
            .into());
        }
        for arg in &ty.args {
            self.check_type(arg)?;
        }
        if let Some(&decl) = self.structs.get(&ty.name.name) {
            self.check_struct(decl)?;
        }
        Ok(())
    }

    /// 在一个类型上查找字段。只有具体的结构体类型才有字段；
    /// 字段的声明类型会按这次实例化的泛型环境完成替换。
    pub(super) fn get_field(&self, ty: &Option<Type>, name: &str) -> Option<NamedType> {
        if let Some(Type::Named(nty)) = ty {
            if let Some(decl) = self.structs.get(&nty.name.name) {
                for field in &decl.fields {
                    if field.name.name == name {
                        let env = generic_env(decl, &nty.args);
                        return Some(resolve_generic_type(&field.ty, &env));
                    }
                }
            }
        }
        None
    }
}
