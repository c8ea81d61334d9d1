//! Doxygen output of a small library, written to a temporary directory.

use std::fs;

use tempfile::TempDir;

use super::Settings;

const INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.1">
  <compound refid="classmylib_1_1Foo" kind="class"><name>mylib::Foo</name></compound>
  <compound refid="namespacemylib" kind="namespace"><name>mylib</name></compound>
</doxygenindex>
"#;

const NAMESPACE: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="namespacemylib" kind="namespace">
    <compoundname>mylib</compoundname>
    <innerclass refid="classmylib_1_1Foo" prot="public">mylib::Foo</innerclass>
    <sectiondef kind="typedef">
      <memberdef kind="typedef" id="t1" prot="public" static="no">
        <type><ref refid="classmylib_1_1Foo" kindref="compound">Foo</ref></type>
        <name>Bar</name>
      </memberdef>
    </sectiondef>
    <sectiondef kind="func">
      <memberdef kind="function" id="f1" prot="public" static="no">
        <type>double</type>
        <definition>double mylib::clamp</definition>
        <argsstring>(double v)</argsstring>
        <name>clamp</name>
        <param><type>double</type><declname>v</declname></param>
        <location file="/src/include/mylib/math.h" line="3"/>
      </memberdef>
    </sectiondef>
  </compounddef>
</doxygen>
"#;

const FOO: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="classmylib_1_1Foo" kind="class" prot="public">
    <compoundname>mylib::Foo</compoundname>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="m1" prot="public" static="no">
        <type></type>
        <definition>mylib::Foo::Foo</definition>
        <argsstring>()</argsstring>
        <name>Foo</name>
        <location file="/src/include/mylib/foo.h" line="10"/>
      </memberdef>
      <memberdef kind="function" id="m2" prot="public" static="no">
        <type>void</type>
        <definition>void mylib::Foo::show</definition>
        <argsstring>()</argsstring>
        <name>show</name>
        <location file="/src/include/mylib/foo.h" line="12"/>
      </memberdef>
      <memberdef kind="function" id="m3" prot="public" static="no">
        <type>int *</type>
        <definition>int * mylib::Foo::buffer</definition>
        <argsstring>()</argsstring>
        <name>buffer</name>
        <location file="/src/include/mylib/foo.h" line="13"/>
      </memberdef>
    </sectiondef>
    <location file="/src/include/mylib/foo.h" line="5"/>
  </compounddef>
</doxygen>
"#;

/// Write the fixture and return settings pointing at it.
pub(crate) fn doxygen_fixture() -> (TempDir, Settings) {
    let dir = TempDir::new().unwrap();
    let xml = dir.path().join("xml");
    fs::create_dir_all(&xml).unwrap();
    fs::write(xml.join("index.xml"), INDEX).unwrap();
    fs::write(xml.join("namespacemylib.xml"), NAMESPACE).unwrap();
    fs::write(xml.join("classmylib_1_1Foo.xml"), FOO).unwrap();

    let settings = Settings {
        name: Some("mylib".to_string()),
        input: xml,
        output: dir.path().join("bind"),
        ..Settings::default()
    };
    (dir, settings)
}
