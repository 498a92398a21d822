//! Express + TypeScript skeleton.

use serde_json::json;

use nodeforge_core::{
    application::RenderRequest,
    domain::{
        ProjectStructure, RenderContext,
        entities::render::to_kebab_case,
    },
};

use super::{comment_text, identifier, string_literal};
use crate::renderer::openapi::OpenApiDocument;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2022",
    "module": "commonjs",
    "outDir": "dist",
    "rootDir": "src",
    "strict": true,
    "esModuleInterop": true
  },
  "include": ["src"]
}
"#;

const SERVER: &str = r#"import express from "express";
import { router } from "./routes";

const app = express();
app.use(express.json());
app.use(router);

const port = Number(process.env.PORT ?? {{SERVER_PORT}});

app.listen(port, () => {
  console.log(`{{NODE_NAME}} listening on port ${port}`);
});
"#;

const ROUTES: &str = r#"import { Request, Response, Router } from "express";

export const router = Router();
{{ROUTES}}"#;

const DOCKERFILE: &str = r#"FROM node:20-alpine AS build
WORKDIR /app
COPY package.json tsconfig.json ./
RUN npm install
COPY src ./src
RUN npm run build

FROM node:20-alpine
WORKDIR /app
ENV NODE_ENV=production
COPY package.json ./
RUN npm install --omit=dev
COPY --from=build /app/dist ./dist
EXPOSE {{SERVER_PORT}}
CMD ["node", "dist/server.js"]
"#;

/// `/users/{id}` → `/users/:id`
pub(crate) fn express_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => format!(":{param}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn routes(document: &OpenApiDocument) -> String {
    let mut out = String::new();
    for op in document.operations() {
        out.push('\n');
        if let Some(summary) = &op.summary {
            out.push_str(&format!("// {}\n", comment_text(summary)));
        }
        out.push_str(&format!(
            "router.{}(\"{}\", function {}(_req: Request, res: Response) {{\n  res.status(501).json({{ operation: \"{}\" }});\n}});\n",
            op.method.lowercase(),
            string_literal(&express_path(&op.path)),
            identifier(&op.operation_id, "operation"),
            string_literal(&op.operation_id),
        ));
    }
    out
}

fn package_json(view: &PackageView<'_>) -> String {
    let manifest = json!({
        "name": view.package_name,
        "version": view.version,
        "description": view.title,
        "private": true,
        "main": "dist/server.js",
        "scripts": {
            "build": "tsc",
            "start": "node dist/server.js"
        },
        "dependencies": {
            "express": "^4.19.2"
        },
        "devDependencies": {
            "@types/express": "^4.17.21",
            "@types/node": "^20.12.7",
            "typescript": "^5.4.5"
        }
    });
    // Serializing a `Value` cannot fail.
    let mut text = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    text.push('\n');
    text
}

struct PackageView<'a> {
    package_name: String,
    version: &'a str,
    title: &'a str,
}

pub(super) fn skeleton(
    structure: ProjectStructure,
    request: &RenderRequest,
    document: &OpenApiDocument,
) -> ProjectStructure {
    let view = PackageView {
        package_name: format!(
            "@{}/{}",
            to_kebab_case(&request.owner_name),
            to_kebab_case(&request.node_name)
        ),
        version: if document.info.version.is_empty() {
            "0.1.0"
        } else {
            &document.info.version
        },
        title: &document.info.title,
    };

    let ctx = RenderContext::new()
        .with_variable("NODE_NAME", &request.node_name)
        .with_variable("SERVER_PORT", request.port.to_string())
        .with_variable("ROUTES", routes(document));

    structure
        .with_file("package.json", package_json(&view))
        .with_file("tsconfig.json", TSCONFIG)
        .with_file("src/server.ts", ctx.render(SERVER))
        .with_file("src/routes.ts", ctx.render(ROUTES))
        .with_file("Dockerfile", ctx.render(DOCKERFILE))
}
