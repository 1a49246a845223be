// 表达式降低。每个表达式降低为一段 C 表达式文本。

use super::Generator;
use crate::parser::ast::{Expr, NamedType};

impl Generator<'_> {
    pub(super) fn gen_expr(&mut self, expr: &Expr) -> String {
        match expr {
            // 整数词素原样写出
            Expr::Int { val, .. } => val.clone(),
            Expr::Str { val, .. } => {
                // 字符串字面量变成切片的复合字面量。
                // 文本是原始词素，长度是它的字节数，转义序列按两个字节计。
                let ty = self.gen_type(&NamedType::slice(NamedType::uint8()));
                format!("({}){{\"{}\", {}}}", ty, val, val.len())
            }
            Expr::Var { name } => match name.name.as_str() {
                "true" => "1".to_string(),
                "false" => "0".to_string(),
                _ => name.name.clone(),
            },
            Expr::Call { callee, args } => {
                let callee = self.gen_expr(callee);
                let args: Vec<String> = args.iter().map(|arg| self.gen_expr(arg)).collect();
                format!("{}({})", callee, args.join(", "))
            }
            Expr::Field { base, field } => {
                let base = self.gen_expr(base);
                format!("{}.{}", base, field.name)
            }
        }
    }
}
