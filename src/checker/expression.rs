// 表达式检查。
// 每个表达式产生一个类型（没有返回值的调用除外）和一个可变性标记；
// 可变性沿字段访问传播，决定了赋值语句左边的合法性。

use super::types::type_equal;
use super::{Checker, SemanticError};
use crate::parser::ast::{Expr, NamedType, Type};
use crate::reporter::CompilerError;

/// 表达式检查的结果。
/// `ty` 为空表示表达式没有值（调用了一个没有返回类型的函数）。
#[derive(Debug, Clone)]
pub struct ExprResult {
    pub ty: Option<Type>,
    pub mutable: bool,
}

impl<'m> Checker<'m> {
    pub(super) fn check_expr(&mut self, expr: &Expr) -> Result<ExprResult, CompilerError> {
        match expr {
            Expr::Int { .. } => Ok(ExprResult {
                ty: Some(Type::Named(NamedType::int32())),
                mutable: false,
            }),
            Expr::Str { .. } => Ok(ExprResult {
                ty: Some(Type::Named(NamedType::slice(NamedType::uint8()))),
                mutable: false,
            }),
            Expr::Var { name } => match self.scope.find_var(&name.name) {
                Some(var) => Ok(ExprResult {
                    ty: Some(var.ty),
                    mutable: var.mutable,
                }),
                None => Err(SemanticError::UndefinedIdent {
                    name: name.name.clone(),
                    pos: expr.at(),
                }
                .into()),
            },
            Expr::Call { callee, args } => {
                let fun = self.check_expr(callee)?;
                match fun.ty {
                    Some(Type::Fn(fn_ty)) => {
                        if args.len() != fn_ty.params.len() {
                            return Err(SemanticError::ArgumentCount {
                                expected: fn_ty.params.len(),
                                found: args.len(),
                                pos: expr.at(),
                            }
                            .into());
                        }
                        // 实参必须能转换到对应形参的类型
                        for (arg, param) in args.iter().zip(&fn_ty.params) {
                            self.check_coerce(arg, param)?;
                        }
                        Ok(ExprResult {
                            ty: fn_ty.ret.map(Type::Named),
                            mutable: false,
                        })
                    }
                    None => Err(SemanticError::CallVoid { pos: callee.at() }.into()),
                    Some(other) => Err(SemanticError::CallNonFn {
                        ty: other.to_string(),
                        pos: callee.at(),
                    }
                    .into()),
                }
            }
            Expr::Field { base, field } => {
                let result = self.check_expr(base)?;
                match self.get_field(&result.ty, &field.name) {
                    Some(ty) => Ok(ExprResult {
                        ty: Some(Type::Named(ty)),
                        mutable: result.mutable,
                    }),
                    None => Err(SemanticError::MissingField {
                        name: field.name.clone(),
                        pos: base.at(),
                    }
                    .into()),
                }
            }
        }
    }

    /// 检查表达式并要求它的类型与目标类型结构相等。没有任何隐式转换。
    pub(super) fn check_coerce(
        &mut self,
        expr: &Expr,
        ty: &NamedType,
    ) -> Result<(), CompilerError> {
        let result = self.check_expr(expr)?;
        let found = match result.ty {
            Some(found) => found,
            None => return Err(SemanticError::NoValue { pos: expr.at() }.into()),
        };
        if !type_equal(&found, ty) {
            return Err(SemanticError::TypeMismatch {
                from: found.to_string(),
                to: ty.to_string(),
                pos: expr.at(),
            }
            .into());
        }
        Ok(())
    }
}
