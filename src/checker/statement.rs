// 语句检查。
// 每个检查函数返回这条语句是否在所有控制路径上返回。
// 分析是保守的：while 循环可能一次都不执行，永远不计为返回。

use super::{Checker, ScopeVar, SemanticError};
use crate::parser::ast::{Expr, NamedType, Stmt, Type};
use crate::reporter::CompilerError;

impl<'m> Checker<'m> {
    /// 依次检查块中的语句。
    /// 只要有一条语句在所有路径上返回，整个块就在所有路径上返回。
    pub(super) fn check_block(
        &mut self,
        block: &[Stmt],
        ret: Option<&NamedType>,
    ) -> Result<bool, CompilerError> {
        let mut returns = false;
        for stmt in block {
            if self.check_stmt(stmt, ret)? {
                returns = true;
            }
        }
        Ok(returns)
    }

    pub(super) fn check_stmt(
        &mut self,
        stmt: &Stmt,
        ret: Option<&NamedType>,
    ) -> Result<bool, CompilerError> {
        match stmt {
            Stmt::Expr(expr) => {
                // 只有函数调用可以被用作语句
                if let Expr::Call { .. } = expr {
                    self.check_expr(expr)?;
                } else {
                    return Err(SemanticError::InvalidExprStmt { pos: expr.at() }.into());
                }
                Ok(false)
            }
            Stmt::Block { stmts, .. } => self.check_block(stmts, ret),
            Stmt::Return { pos, expr } => match (ret, expr) {
                (Some(ret), None) => Err(SemanticError::MissingReturnValue {
                    ty: ret.name.name.clone(),
                    pos: *pos,
                }
                .into()),
                (None, Some(expr)) => {
                    Err(SemanticError::UnexpectedReturnValue { pos: expr.at() }.into())
                }
                (Some(ret), Some(expr)) => {
                    self.check_coerce(expr, ret)?;
                    Ok(true)
                }
                (None, None) => Ok(true),
            },
            Stmt::Var { name, ty, init, .. } => {
                if self.scope.find_var(&name.name).is_some() {
                    return Err(SemanticError::DuplicateIdent {
                        name: name.name.clone(),
                        pos: name.pos,
                    }
                    .into());
                }
                // var 绑定是可变的
                self.scope.add_var(
                    &name.name,
                    ScopeVar {
                        ty: Type::Named(ty.clone()),
                        mutable: true,
                    },
                );
                self.check_type(ty)?;
                if let Some(init) = init {
                    self.check_coerce(init, ty)?;
                }
                Ok(false)
            }
            Stmt::Assign { left, right } => {
                let lhs = self.check_expr(left)?;
                if !lhs.mutable {
                    return Err(SemanticError::AssignToConst { pos: left.at() }.into());
                }
                let ty = match lhs.ty {
                    Some(Type::Named(ty)) => ty,
                    _ => unreachable!("mutable expression without a value type"),
                };
                self.check_coerce(right, &ty)?;
                Ok(false)
            }
            Stmt::If {
                cond, body, els, ..
            } => {
                self.check_coerce(cond, &NamedType::boolean())?;
                self.scope.enter();
                let mut returns = self.check_block(body, ret)?;
                self.scope.exit();
                if let Some(els) = els {
                    self.scope.enter();
                    if !self.check_stmt(els, ret)? {
                        returns = false;
                    }
                    self.scope.exit();
                } else {
                    // 没有 else 的 if 不计为返回
                    returns = false;
                }
                Ok(returns)
            }
            Stmt::While { cond, body, .. } => {
                self.check_coerce(cond, &NamedType::boolean())?;
                self.scope.enter();
                self.check_block(body, ret)?;
                self.scope.exit();
                Ok(false)
            }
        }
    }
}
