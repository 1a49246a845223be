// 函数降低。
// 每个函数都在头文件里得到一个前向声明；
// 带函数体的函数在实现文件里得到定义。extern 声明只有前者。

use super::Generator;
use crate::parser::ast::FnDecl;

impl Generator<'_> {
    pub(super) fn gen_fn(&mut self, decl: &FnDecl) {
        // 签名的构造会触发所需结构体的单态化，它们先于声明进入头文件
        let return_type = match &decl.ret {
            Some(ret) => self.gen_type(ret),
            None => "void".to_string(),
        };
        let mut params = Vec::new();
        for param in &decl.params {
            let param_type = self.gen_type(&param.ty);
            params.push(format!("{} {}", param_type, param.name.name));
        }
        let signature = format!(
            "{} {}({})",
            return_type,
            decl.name.name,
            params.join(", ")
        );
        self.header.push_str(&format!("{};\n", signature));
        if let Some(body) = &decl.body {
            self.body.push_str(&format!("{} ", signature));
            self.gen_block(body);
            self.body.push_str("\n\n");
        }
    }
}
