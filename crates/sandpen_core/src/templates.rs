//! Built-in starter projects.

use crate::fragment::Fragments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Identifier used on the command line
    pub id: &'static str,
    pub name: &'static str,
    pub markup: &'static str,
    pub style: &'static str,
    pub script: &'static str,
}

impl Template {
    pub fn fragments(&self) -> Fragments {
        Fragments::new(self.markup, self.style, self.script)
    }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "starter",
        name: "Starter",
        markup: r#"<div class="container">
  <h1>Hello, World!</h1>
  <p>Edit the fragments or generate something new from a prompt.</p>
  <button id="myButton">Click Me</button>
</div>"#,
        style: r"body {
  font-family: system-ui, sans-serif;
  color: #e2e8f0;
  display: flex;
  justify-content: center;
  align-items: center;
  height: 100%;
  margin: 0;
  background-color: #0f172a;
}

.container {
  text-align: center;
  background: #1e293b;
  padding: 2rem 4rem;
  border-radius: 1rem;
}

h1 {
  color: #38bdf8;
}

button {
  background-image: linear-gradient(to right, #3b82f6, #06b6d4);
  color: white;
  padding: 0.75rem 1.5rem;
  border-radius: 9999px;
  border: none;
  cursor: pointer;
}",
        script: r"const button = document.getElementById('myButton');

button.addEventListener('click', () => {
  console.log('Hello from JavaScript!', { a: 1, b: 'test' });
});
",
    },
    Template {
        id: "hello-world",
        name: "Hello World",
        markup: "<h1>Hello, World!</h1>\n<p>Welcome to your first pen.</p>",
        style: r"body {
  font-family: sans-serif;
  background-color: #f0f0f0;
  display: flex;
  justify-content: center;
  align-items: center;
  height: 100vh;
  margin: 0;
}

h1 {
  color: #333;
}",
        script: "console.log('Hello from the JavaScript console!');",
    },
    Template {
        id: "login-form",
        name: "Login Form",
        markup: r#"<div class="login">
  <h2>Login</h2>
  <form>
    <label for="username">Username</label>
    <input type="text" id="username" required>
    <label for="password">Password</label>
    <input type="password" id="password" required>
    <button type="submit">Login</button>
  </form>
</div>"#,
        style: r"body {
  font-family: Arial, sans-serif;
  background: #f4f4f9;
  display: flex;
  justify-content: center;
  align-items: center;
  height: 100vh;
}

.login {
  background: white;
  padding: 2rem;
  border-radius: 8px;
  width: 300px;
}

label, input, button {
  display: block;
  width: 100%;
  margin-bottom: 0.75rem;
}",
        script: r"const form = document.querySelector('form');

form.addEventListener('submit', (e) => {
  e.preventDefault();
  console.info('Login submitted for', document.getElementById('username').value);
});",
    },
    Template {
        id: "product-card",
        name: "Product Card",
        markup: r#"<div class="card">
  <div class="card-content">
    <h3>Awesome Gadget</h3>
    <p class="price">$99.99</p>
    <button class="add">Add to Cart</button>
  </div>
</div>"#,
        style: r".card {
  width: 300px;
  margin: 2rem auto;
  border-radius: 10px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  font-family: sans-serif;
}

.card-content {
  padding: 1rem;
}

.price {
  color: #2a9d8f;
  font-weight: bold;
}",
        script: r"let count = 0;

document.querySelector('.add').addEventListener('click', () => {
  count += 1;
  console.log('Items in cart:', count);
});",
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Template used for a brand new project
pub fn starter() -> &'static Template {
    &TEMPLATES[0]
}
