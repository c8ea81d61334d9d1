//! Snapshot tests for Lua binding generation.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::rc::Rc;

use dub_codegen::testing::{MemberDef, assert_content_eq, compound, generate_to_temp};
use dub_codegen_lua::{ClassGen, Generator, IgnoreReason, LanguageCodegen};
use dub_model::{Function, KlassDecl, Namespace};

const HEADER: &str = "/home/dev/proj/include/mylib/foo.h";

fn foo_decl() -> KlassDecl {
    KlassDecl::new("Foo", compound("mylib::Foo", HEADER))
        .member(
            MemberDef::new("Foo", "")
                .param("int", "w")
                .param_default("int", "h", "0")
                .location(HEADER, 10)
                .build(),
        )
        .member(MemberDef::new("~Foo", "").location(HEADER, 11).build())
        .member(MemberDef::new("show", "void").location(HEADER, 12).build())
        .member(
            MemberDef::new("set", "void")
                .param("double", "v")
                .location(HEADER, 13)
                .build(),
        )
        .member(
            MemberDef::new("set", "void")
                .param("const char *", "s")
                .location(HEADER, 14)
                .build(),
        )
        .member(
            MemberDef::new("operator+", "Foo")
                .param("const Foo &", "other")
                .location(HEADER, 15)
                .build(),
        )
        .member(
            MemberDef::new("values", "std::vector< int >")
                .location(HEADER, 16)
                .build(),
        )
        .member(MemberDef::new("buffer", "int *").location(HEADER, 17).build())
        .member(MemberDef::new("name", "const char *").location(HEADER, 18).build())
        .alias("Bar")
}

fn clamp_decl() -> dub_model::DeclNode {
    MemberDef::new("clamp", "double")
        .param("double", "v")
        .param("double", "lo")
        .param("double", "hi")
        .location("/home/dev/proj/include/mylib/math.h", 3)
        .build()
}

fn mylib() -> Rc<Namespace> {
    Namespace::new("mylib", vec![foo_decl()], vec![clamp_decl()])
}

fn generator(class_gen: ClassGen) -> Generator {
    Generator::new(mylib(), class_gen)
}

fn member<'a>(generator: &'a Generator, name: &str) -> Vec<&'a Function> {
    generator
        .namespace()
        .klass("Foo")
        .expect("Foo not found")
        .member(name)
        .expect("member not found")
        .leaves()
}

fn preview_file(generator: &Generator, path: &str) -> String {
    generator
        .preview()
        .expect("preview failed")
        .into_iter()
        .find(|f| f.path == path)
        .map(|f| f.content)
        .unwrap_or_else(|| panic!("{} not generated", path))
}

#[test]
fn test_member_method_wrapper() {
    let generator = generator(ClassGen::new());
    let show = member(&generator, "show")[0].render().unwrap();

    insta::assert_snapshot!(show, @r#"
/** void show()
 * include/mylib/foo.h:12
 */
static int Foo_show(lua_State *L) {
  try {
    Foo *self__ = *((Foo **)dubL_checkudata(L, 1, "mylib.Foo"));
    self__->show();
    return 0;
  } catch (std::exception &e) {
    lua_pushfstring(L, "Foo::show: %s", e.what());
  } catch (...) {
    lua_pushfstring(L, "Foo::show: Unknown exception");
  }
  return lua_error(L);
}
"#);
}

#[test]
fn test_constructor_with_default_argument() {
    let generator = generator(ClassGen::new());
    let klass = generator.namespace().klass("Foo").unwrap();
    let ctor = klass.constructor().unwrap().render().unwrap();

    insta::assert_snapshot!(ctor, @r#"
/** Foo(int w, int h)
 * include/mylib/foo.h:10
 */
static int Foo_Foo(lua_State *L) {
  try {
    int w = (int)luaL_checkinteger(L, 1);
    int top__ = lua_gettop(L);
    if (top__ >= 2) {
      int h = (int)luaL_checkinteger(L, 2);
      Foo *retval__ = new Foo(w, h);
      dub_pushudata(L, retval__, "mylib.Foo", true);
      return 1;
    } else {
      Foo *retval__ = new Foo(w);
      dub_pushudata(L, retval__, "mylib.Foo", true);
      return 1;
    }
  } catch (std::exception &e) {
    lua_pushfstring(L, "Foo::Foo: %s", e.what());
  } catch (...) {
    lua_pushfstring(L, "Foo::Foo: Unknown exception");
  }
  return lua_error(L);
}
"#);
}

#[test]
fn test_overload_names() {
    let generator = generator(ClassGen::new());
    let set = member(&generator, "set");

    assert_eq!(set[0].method_name(None).unwrap(), "Foo_set1");
    assert_eq!(set[1].method_name(None).unwrap(), "Foo_set2");
    assert_eq!(set[1].method_name(Some(0)).unwrap(), "Foo_set");
}

#[test]
fn test_overload_chooser() {
    let generator = generator(ClassGen::new());
    let content = preview_file(&generator, "mylib_Foo.cpp");

    let expected = r#"/** Overloaded function chooser for set(...) */
static int Foo_set(lua_State *L) {
  int top__ = lua_gettop(L);
  if (top__ == 2 && lua_type(L, 2) == LUA_TNUMBER) {
    return Foo_set1(L);
  } else if (top__ == 2 && lua_type(L, 2) == LUA_TSTRING) {
    return Foo_set2(L);
  }
  lua_pushstring(L, "Foo::set: no overload accepts these arguments");
  return lua_error(L);
}
"#;
    assert!(content.contains(expected), "chooser not found in:\n{}", content);
}

#[test]
fn test_method_registration() {
    let generator = generator(ClassGen::new());
    let klass = generator.namespace().klass("Foo").unwrap();
    let table = generator.class_gen().method_registration(klass).unwrap();

    assert_content_eq(
        r#"{ "show"              , Foo_show },
{ "set"               , Foo_set },
{ "name"              , Foo_name },
{ "__tostring"        , Foo__tostring },
{ "__gc"              , Foo_destructor }"#,
        &table,
    );
}

#[test]
fn test_method_registration_without_members() {
    let ns = Namespace::new(
        "mylib",
        vec![
            KlassDecl::new("Empty", compound("mylib::Empty", HEADER))
                .member(MemberDef::new("operator=", "Empty &").build()),
        ],
        vec![],
    );
    let generator = Generator::new(ns, ClassGen::new());
    let klass = generator.namespace().klass("Empty").unwrap();

    assert!(generator.class_gen().members_list(klass.members()).is_none());
    let table = generator.class_gen().method_registration(klass).unwrap();
    assert_eq!(table.lines().count(), 2);
    assert!(table.contains("Empty__tostring"));
    assert!(table.contains("Empty_destructor"));
    assert_eq!(
        generator.class_gen().namespace_methods_registration(klass).unwrap(),
        ""
    );
}

#[test]
fn test_namespace_methods_registration_includes_aliases() {
    let generator = generator(ClassGen::new());
    let klass = generator.namespace().klass("Foo").unwrap();
    let table = generator
        .class_gen()
        .namespace_methods_registration(klass)
        .unwrap();

    assert_content_eq(r#"{ "Foo"               , Foo_Foo },
{ "Bar"               , Foo_Foo }"#, &table);
}

#[test]
fn test_ignore_rules() {
    let generator = generator(ClassGen::new().with_ignored(["Foo::name"]));
    let class_gen = generator.class_gen();
    let reason = |name: &str| class_gen.ignore_reason(member(&generator, name)[0]);

    assert_eq!(reason("operator+"), Some(IgnoreReason::Operator));
    assert_eq!(reason("values"), Some(IgnoreReason::TemplateReturn));
    assert_eq!(reason("buffer"), Some(IgnoreReason::NativePointerReturn));
    assert_eq!(reason("name"), Some(IgnoreReason::Configured));
    assert_eq!(reason("show"), None);
    assert_eq!(reason("~Foo"), Some(IgnoreReason::Destructor));
}

#[test]
fn test_template_in_signature_is_ignored() {
    let ns = Namespace::new(
        "mylib",
        vec![
            KlassDecl::new("Foo", compound("mylib::Foo", HEADER)).member(
                MemberDef::new("fill", "void")
                    .param("const std::vector< int > &", "values")
                    .argsstring("(const std::vector&lt; int &gt; &amp;values)")
                    .build(),
            ),
        ],
        vec![],
    );
    let generator = Generator::new(ns, ClassGen::new());
    let klass = generator.namespace().klass("Foo").unwrap();
    let fill = klass.member("fill").unwrap().first().unwrap();

    assert_eq!(
        generator.class_gen().ignore_reason(fill),
        Some(IgnoreReason::TemplateSignature)
    );
    assert!(generator.class_gen().members_list(klass.members()).is_none());
}

#[test]
fn test_class_file_layout() {
    let generator = generator(ClassGen::new());
    let content = preview_file(&generator, "mylib_Foo.cpp");

    assert!(content.starts_with("/**\n *\n * MACHINE GENERATED FILE. DO NOT EDIT.\n"));
    assert!(content.contains(" * Bindings for class Foo\n"));
    assert!(content.contains("#include \"dub/dub.h\"\n#include \"foo.h\"\n"));
    assert!(content.contains("using namespace mylib;"));
    assert!(content.contains("static int Foo_destructor(lua_State *L) {"));
    assert!(content.contains("if (userdata->gc && userdata->ptr) delete (Foo *)userdata->ptr;"));
    assert!(content.contains("lua_pushfstring(L, \"<mylib.Foo: %p>\", userdata->ptr);"));
    assert!(content.contains("  { \"__gc\"              , Foo_destructor },\n  { \"deleted\"           , dub_isDeleted },\n  { NULL, NULL },\n"));
    assert!(!content.contains("dub_register_const"));
    assert!(content.contains("static int Foo_set1(lua_State *L) {"));
    assert!(content.contains("static int Foo_set2(lua_State *L) {"));
    assert!(content.contains("static int Foo_name(lua_State *L) {"));
    assert!(content.contains("extern \"C\" int luaopen_mylib_Foo(lua_State *L) {"));
    assert!(content.contains("luaL_register(L, \"mylib\", Foo_namespace_methods);"));

    for ignored in ["operator+", "values", "buffer", "~Foo"] {
        assert!(
            !content.contains(&format!("Foo_{}", ignored)),
            "{} should not be bound",
            ignored
        );
    }
}

#[test]
fn test_header_base() {
    let generator = generator(ClassGen::new().with_header_base("include"));
    let content = preview_file(&generator, "mylib_Foo.cpp");

    assert!(content.contains("#include \"mylib/foo.h\""));
}

#[test]
fn test_free_functions() {
    let generator = generator(ClassGen::new());
    let content = preview_file(&generator, "mylib.cpp");

    assert!(content.contains(" * Bindings for namespace mylib\n"));
    assert!(content.contains("#include \"math.h\""));
    assert!(content.contains("static int mylib_clamp(lua_State *L) {"));
    assert!(content.contains("    double hi = (double)luaL_checknumber(L, 3);\n"));
    assert!(content.contains("    double retval__ = clamp(v, lo, hi);\n    lua_pushnumber(L, retval__);\n"));
    assert!(content.contains("  { \"clamp\"             , mylib_clamp },\n  { NULL, NULL },\n"));
    assert!(content.contains("luaL_register(L, \"mylib\", mylib_functions);"));
}

#[test]
fn test_no_namespace_file_without_free_functions() {
    let ns = Namespace::new("mylib", vec![foo_decl()], vec![]);
    let generator = Generator::new(ns, ClassGen::new());
    let paths: Vec<String> = generator
        .preview()
        .unwrap()
        .into_iter()
        .map(|f| f.path)
        .collect();

    assert_eq!(paths, vec!["mylib_Foo.cpp", "dub/dub.h"]);
}

#[test]
fn test_unsupported_types_are_ignored() {
    let ns = Namespace::new(
        "mylib",
        vec![
            KlassDecl::new("Foo", compound("mylib::Foo", HEADER))
                .member(MemberDef::new("show", "void").location(HEADER, 3).build())
                .member(MemberDef::new("handle", "void *").location(HEADER, 4).build())
                .member(
                    MemberDef::new("fill", "void")
                        .param("float *", "buf")
                        .location(HEADER, 5)
                        .build(),
                ),
            KlassDecl::new("Other", compound("mylib::Other", HEADER))
                .member(MemberDef::new("ok", "bool").location(HEADER, 9).build()),
        ],
        vec![],
    );
    let generator = Generator::new(ns, ClassGen::new());
    let files = generator.preview().unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["mylib_Foo.cpp", "mylib_Other.cpp", "dub/dub.h"]);

    let foo = preview_file(&generator, "mylib_Foo.cpp");
    assert!(foo.contains("static int Foo_show(lua_State *L) {"));
    assert!(!foo.contains("Foo_handle"));
    assert!(!foo.contains("Foo_fill"));

    assert_eq!(
        generator.ignored(),
        vec![
            ("Foo::handle".to_string(), IgnoreReason::UnsupportedType),
            ("Foo::fill".to_string(), IgnoreReason::UnsupportedType),
        ]
    );
}

#[test]
fn test_returned_pointers_are_borrowed() {
    let ns = Namespace::new(
        "mylib",
        vec![
            KlassDecl::new("Foo", compound("mylib::Foo", HEADER))
                .member(MemberDef::new("parent", "Foo *").location(HEADER, 3).build())
                .member(MemberDef::new("peer", "const Foo *").location(HEADER, 4).build())
                .member(MemberDef::new("copy", "Foo").location(HEADER, 5).build()),
        ],
        vec![],
    );
    let generator = Generator::new(ns, ClassGen::new());
    let klass = generator.namespace().klass("Foo").unwrap();
    let render = |name: &str| klass.member(name).unwrap().first().unwrap().render().unwrap();

    assert!(render("parent").contains(
        "    Foo *retval__ = self__->parent();\n    dub_pushudata(L, retval__, \"mylib.Foo\", false);\n"
    ));
    assert!(render("peer").contains(
        "    const Foo *retval__ = self__->peer();\n    dub_pushudata(L, const_cast<Foo *>(retval__), \"mylib.Foo\", false);\n"
    ));
    assert!(render("copy").contains(
        "    dub_pushudata(L, new Foo(retval__), \"mylib.Foo\", true);\n"
    ));
}

#[test]
fn test_integer_overload_chosen_before_number() {
    let ns = Namespace::new(
        "mylib",
        vec![
            KlassDecl::new("Foo", compound("mylib::Foo", HEADER))
                .member(
                    MemberDef::new("set", "void")
                        .param("double", "v")
                        .location(HEADER, 3)
                        .build(),
                )
                .member(
                    MemberDef::new("set", "void")
                        .param("int", "v")
                        .location(HEADER, 4)
                        .build(),
                ),
        ],
        vec![],
    );
    let generator = Generator::new(ns, ClassGen::new());
    let content = preview_file(&generator, "mylib_Foo.cpp");

    let expected = r#"static int Foo_set(lua_State *L) {
  int top__ = lua_gettop(L);
  if (top__ == 2 && dub_isinteger(L, 2)) {
    return Foo_set2(L);
  } else if (top__ == 2 && lua_type(L, 2) == LUA_TNUMBER) {
    return Foo_set1(L);
  }
"#;
    assert!(content.contains(expected), "chooser not found in:\n{}", content);
}

#[test]
fn test_class_constants() {
    let ns = Namespace::new(
        "mylib",
        vec![
            KlassDecl::new("Foo", compound("mylib::Foo", HEADER))
                .member(MemberDef::new("show", "void").location(HEADER, 3).build())
                .constant("NORMAL")
                .constant("FAST"),
        ],
        vec![],
    );
    let generator = Generator::new(ns, ClassGen::new());
    let content = preview_file(&generator, "mylib_Foo.cpp");

    let table = r#"static const struct dub_const_Reg Foo_const[] = {
  { "NORMAL"            , Foo::NORMAL },
  { "FAST"              , Foo::FAST },
  { NULL, 0 },
};
"#;
    assert!(content.contains(table), "constants not found in:\n{}", content);
    assert!(content.contains(
        "  // register class constants\n  dub_register_const(L, Foo_const);\n\n  // register member methods\n"
    ));
    assert!(content.contains("{ \"deleted\"           , dub_isDeleted },"));
}

#[test]
fn test_generate_writes_files() {
    let generator = generator(ClassGen::new());

    let dir = generate_to_temp(|path| {
        let result = generator.generate(path)?;
        assert_eq!(result.written, vec!["mylib_Foo.cpp", "mylib.cpp", "dub/dub.h"]);
        assert!(result.skipped.is_empty());
        assert_eq!(
            result.ignored,
            vec!["Foo::~Foo", "Foo::operator+", "Foo::values", "Foo::buffer"]
        );
        Ok(())
    })
    .unwrap();

    assert!(dir.path().join("mylib_Foo.cpp").exists());
    assert!(dir.path().join("dub/dub.h").exists());

    let second = generator.generate(dir.path()).unwrap();
    assert_eq!(second.skipped, vec!["dub/dub.h"]);
}
