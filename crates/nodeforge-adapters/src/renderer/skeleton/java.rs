//! Spring Boot skeleton.

use nodeforge_core::{
    application::RenderRequest,
    domain::{
        ProjectStructure, RenderContext,
        entities::render::{to_kebab_case, to_pascal_case},
    },
};

use super::{comment_text, identifier, string_literal};
use crate::renderer::openapi::{HttpMethod, OpenApiDocument};

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.2.5</version>
        <relativePath/>
    </parent>
    <groupId>{{GROUP_ID}}</groupId>
    <artifactId>{{ARTIFACT_ID}}</artifactId>
    <version>{{API_VERSION}}</version>
    <name>{{API_TITLE}}</name>
    <properties>
        <java.version>17</java.version>
    </properties>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-test</artifactId>
            <scope>test</scope>
        </dependency>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#;

const APPLICATION: &str = r#"package {{PACKAGE}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class {{CLASS_PREFIX}}Application {

    public static void main(String[] args) {
        SpringApplication.run({{CLASS_PREFIX}}Application.class, args);
    }
}
"#;

const CONTROLLER: &str = r#"package {{PACKAGE}}.controller;

import org.springframework.http.HttpStatus;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.*;

@RestController
public class {{CLASS_PREFIX}}Controller {
{{METHODS}}}
"#;

const PROPERTIES: &str = "spring.application.name={{ARTIFACT_ID}}\nserver.port=${SERVER_PORT:{{SERVER_PORT}}}\n";

const DOCKERFILE: &str = r#"FROM maven:3.9-eclipse-temurin-17 AS build
WORKDIR /app
COPY pom.xml .
COPY src ./src
RUN mvn -q package -DskipTests

FROM eclipse-temurin:17-jre
WORKDIR /app
COPY --from=build /app/target/{{ARTIFACT_ID}}-{{API_VERSION}}.jar app.jar
EXPOSE {{SERVER_PORT}}
ENTRYPOINT ["sh", "-c", "java $JAVA_OPTS -jar app.jar"]
"#;

/// Lowercase letters and digits only, never starting with a digit.
fn package_segment(s: &str) -> String {
    let segment: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match segment.chars().next() {
        None => "app".into(),
        Some(c) if c.is_ascii_digit() => format!("n{segment}"),
        Some(_) => segment,
    }
}

fn mapping_annotation(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GetMapping",
        HttpMethod::Post => "PostMapping",
        HttpMethod::Put => "PutMapping",
        HttpMethod::Patch => "PatchMapping",
        HttpMethod::Delete => "DeleteMapping",
    }
}

fn controller_methods(document: &OpenApiDocument) -> String {
    let mut out = String::new();
    for op in document.operations() {
        out.push('\n');
        if let Some(summary) = &op.summary {
            out.push_str(&format!("    /** {} */\n", comment_text(summary)));
        }
        out.push_str(&format!(
            "    @{}(\"{}\")\n    public ResponseEntity<Void> {}() {{\n        return ResponseEntity.status(HttpStatus.NOT_IMPLEMENTED).build();\n    }}\n",
            mapping_annotation(op.method),
            string_literal(&op.path),
            identifier(&op.operation_id, "operation"),
        ));
    }
    out
}

pub(super) fn skeleton(
    structure: ProjectStructure,
    request: &RenderRequest,
    document: &OpenApiDocument,
) -> ProjectStructure {
    let group_id = format!("com.{}", package_segment(&request.owner_name));
    let package = format!("{group_id}.{}", package_segment(&request.node_name));
    let package_dir = format!("src/main/java/{}", package.replace('.', "/"));
    let version = if document.info.version.is_empty() {
        "0.1.0"
    } else {
        document.info.version.as_str()
    };

    let ctx = RenderContext::new()
        .with_variable("GROUP_ID", &group_id)
        .with_variable("PACKAGE", &package)
        .with_variable("ARTIFACT_ID", to_kebab_case(&request.node_name))
        .with_variable("CLASS_PREFIX", to_pascal_case(&request.node_name))
        .with_variable("API_TITLE", &document.info.title)
        .with_variable("API_VERSION", version)
        .with_variable("SERVER_PORT", request.port.to_string())
        .with_variable("METHODS", controller_methods(document));

    let class_prefix = to_pascal_case(&request.node_name);

    structure
        .with_file("pom.xml", ctx.render(POM))
        .with_file(
            format!("{package_dir}/{class_prefix}Application.java"),
            ctx.render(APPLICATION),
        )
        .with_file(
            format!("{package_dir}/controller/{class_prefix}Controller.java"),
            ctx.render(CONTROLLER),
        )
        .with_file(
            "src/main/resources/application.properties",
            ctx.render(PROPERTIES),
        )
        .with_file("Dockerfile", ctx.render(DOCKERFILE))
}
