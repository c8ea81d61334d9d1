use std::path::{Path, PathBuf};

use dub_core::{FileRules, GeneratedFile};

pub const DUB_H_PATH: &str = "dub/dub.h";

/// Helpers shared by every generated binding. Written once so it can be customised.
pub struct DubH;

impl GeneratedFile for DubH {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(DUB_H_PATH)
    }

    fn rules(&self) -> FileRules {
        FileRules::if_missing()
    }

    fn render(&self) -> String {
        r#"#ifndef DUB_DUB_H_
#define DUB_DUB_H_

extern "C" {
#include "lua.h"
#include "lauxlib.h"
}

#include <exception>

// Userdata payload: the wrapped object and whether Lua deletes it on collection.
struct DubUserdata {
  void *ptr;
  bool gc;
};

// Named numeric constant registered on a class metatable.
struct dub_const_Reg {
  const char *name;
  double value;
};

// Slot holding the object of a live userdata of the given metatable, or a Lua error.
inline void **dubL_checkudata(lua_State *L, int ud, const char *tname) {
  DubUserdata *userdata = (DubUserdata *)luaL_checkudata(L, ud, tname);
  if (userdata->ptr == NULL) luaL_error(L, "using deleted %s", tname);
  return &userdata->ptr;
}

// True when the value at `ud` is a userdata of the given metatable.
inline bool dubL_testudata(lua_State *L, int ud, const char *tname) {
  if (lua_touserdata(L, ud) == NULL || !lua_getmetatable(L, ud)) return false;
  luaL_getmetatable(L, tname);
  bool ok = lua_rawequal(L, -1, -2) != 0;
  lua_pop(L, 2);
  return ok;
}

// True when the value at `index` is a number without a fractional part.
inline bool dub_isinteger(lua_State *L, int index) {
  if (lua_type(L, index) != LUA_TNUMBER) return false;
  lua_Number n = lua_tonumber(L, index);
  return n == (lua_Number)(lua_Integer)n;
}

// Push `ptr` as a new userdata with the given metatable. With `gc` set the
// object is deleted when the userdata is collected.
inline void dub_pushudata(lua_State *L, void *ptr, const char *tname, bool gc) {
  DubUserdata *userdata = (DubUserdata *)lua_newuserdata(L, sizeof(DubUserdata));
  userdata->ptr = ptr;
  userdata->gc = gc;
  luaL_getmetatable(L, tname);
  lua_setmetatable(L, -2);
}

// Set every constant of `regs` on the table at the top of the stack.
inline void dub_register_const(lua_State *L, const dub_const_Reg *regs) {
  for (; regs->name; ++regs) {
    lua_pushnumber(L, regs->value);
    lua_setfield(L, -2, regs->name);
  }
}

// `obj:deleted()`: true once the wrapped object is gone.
inline int dub_isDeleted(lua_State *L) {
  DubUserdata *userdata = (DubUserdata *)lua_touserdata(L, 1);
  lua_pushboolean(L, userdata == NULL || userdata->ptr == NULL);
  return 1;
}

#endif // DUB_DUB_H_
"#
        .to_string()
    }
}
