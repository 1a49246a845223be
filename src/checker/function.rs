// 函数检查。

use super::{Checker, ScopeVar, SemanticError};
use crate::parser::ast::{FnDecl, Type};
use crate::reporter::CompilerError;

impl<'m> Checker<'m> {
    /// 检查一个函数声明。
    /// 形参作为不可变绑定进入函数作用域；
    /// 缺失的函数体（extern 声明）按空语句序列参与返回路径分析。
    pub(super) fn check_fn(&mut self, decl: &FnDecl) -> Result<(), CompilerError> {
        self.scope.enter();
        if let Some(ret) = &decl.ret {
            self.check_type(ret)?;
        }
        for param in &decl.params {
            self.check_type(&param.ty)?;
            if self.scope.find_var(&param.name.name).is_some() {
                return Err(SemanticError::DuplicateIdent {
                    name: param.name.name.clone(),
                    pos: param.name.pos,
                }
                .into());
            }
            self.scope.add_var(
                &param.name.name,
                ScopeVar {
                    ty: Type::Named(param.ty.clone()),
                    mutable: false,
                },
            );
        }
        let body = decl.body.as_deref().unwrap_or(&[]);
        let returns = self.check_block(body, decl.ret.as_ref())?;
        if let Some(ret) = &decl.ret {
            if !returns {
                return Err(SemanticError::MissingReturn { pos: ret.at() }.into());
            }
        }
        self.scope.exit();
        Ok(())
    }
}
