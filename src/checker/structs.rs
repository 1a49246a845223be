// 结构体检查：对字段类型的深度优先遍历。
// 访问状态的三色标记（未访问 / 访问中 / 已完成）检测按值的递归包含。

use super::{Checker, GenericType, SemanticError, Visit};
use crate::parser::ast::StructDecl;
use crate::reporter::CompilerError;
use std::collections::HashSet;

impl<'m> Checker<'m> {
    /// 检查一个结构体声明。已完成的声明直接返回；
    /// 访问中再次进入说明字段包含链成环。
    pub(super) fn check_struct(&mut self, decl: &'m StructDecl) -> Result<(), CompilerError> {
        match self.visit.get(&decl.name.name) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::Started) => {
                // 字段按值包含，环意味着无限大小
                return Err(SemanticError::RecursiveStruct {
                    pos: decl.name.pos,
                }
                .into());
            }
            None => {}
        }

        self.scope.enter();
        // 泛型形参作为零元类型进入这一层作用域
        for param in &decl.params {
            if self.scope.find_type(&param.name).is_some() {
                return Err(SemanticError::DuplicateType {
                    name: param.name.clone(),
                    pos: param.pos,
                }
                .into());
            }
            self.scope
                .add_type(&param.name, GenericType { params: Vec::new() });
        }
        self.visit.insert(decl.name.name.clone(), Visit::Started);

        if decl.fields.is_empty() {
            return Err(SemanticError::EmptyStruct {
                pos: decl.name.pos,
            }
            .into());
        }
        let mut fields = HashSet::new();
        for field in &decl.fields {
            if !fields.insert(field.name.name.as_str()) {
                return Err(SemanticError::DuplicateField {
                    name: field.name.name.clone(),
                    pos: field.name.pos,
                }
                .into());
            }
            // 字段类型的检查可能递归进入其他结构体
            self.check_type(&field.ty)?;
        }

        self.scope.exit();
        self.visit.insert(decl.name.name.clone(), Visit::Done);
        Ok(())
    }
}
