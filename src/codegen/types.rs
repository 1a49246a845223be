// 类型降低与单态化。
// 字段类型先于外层结构体完成降低，因此头文件里被依赖的定义总是在前。

use super::{Generator, Instance};
use crate::checker::types::{generic_env, named_type_equal, resolve_generic_type};
use crate::parser::ast::{NamedType, StructDecl};

impl<'m> Generator<'m> {
    /// 把一个命名类型降低为 C 类型文本。
    /// 内置标量直接映射；其他类型查实例表，
    /// 第一次出现时分配一个新的 `ty<N>` 名字并生成定义。
    pub(super) fn gen_type(&mut self, ty: &NamedType) -> String {
        match ty.name.name.as_str() {
            "u8" => "uint8_t".to_string(),
            "i32" => "int32_t".to_string(),
            "bool" => "_Bool".to_string(),
            _ => {
                for instance in &self.instances {
                    if named_type_equal(&instance.ty, ty) {
                        // 这个实例化已经生成过
                        return format!("struct {}", instance.name);
                    }
                }
                let name = format!("ty{}", self.counter);
                self.counter += 1;
                self.instances.push(Instance {
                    ty: ty.clone(),
                    name: name.clone(),
                });
                if ty.name.name == "slice" {
                    self.gen_slice(&name, &ty.args[0]);
                } else {
                    let decl = *self
                        .structs
                        .get(&ty.name.name)
                        .expect("struct declaration should exist after checking");
                    self.gen_struct(&name, decl, &ty.args);
                }
                format!("struct {}", name)
            }
        }
    }

    /// 为一次结构体实例化生成 C 定义。
    /// 定义文本先在本地拼好再写入头文件，
    /// 这样字段降低过程中产生的其他定义会先落盘。
    fn gen_struct(&mut self, name: &str, decl: &'m StructDecl, args: &[NamedType]) {
        let mut out = format!("struct {} {{\n", name);
        let env = generic_env(decl, args);
        for field in &decl.fields {
            let ty = resolve_generic_type(&field.ty, &env);
            let cty = self.gen_type(&ty);
            out.push_str(&format!("\t{} {};\n", cty, field.name.name));
        }
        out.push_str("};\n\n");
        self.header.push_str(&out);
    }

    /// 为一次切片实例化生成 C 定义：数据指针加长度。
    fn gen_slice(&mut self, name: &str, eltype: &NamedType) {
        let el = self.gen_type(eltype);
        self.header.push_str(&format!(
            "struct {} {{\n\t{} *data;\n\tsize_t length;\n}};\n",
            name, el
        ));
    }
}
